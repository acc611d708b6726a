// This file is part of the terraform-provider-spotinst project
//
// Copyright (C) The terraform-provider-spotinst Authors, 2026.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Field tables
//!
//! A resource is described attribute by attribute: each [`Field`] owns the schema of one
//! attribute (or nested block) and the closures copying its value from the API object into
//! the state, and from the state into the create and update requests.

use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use serde::Serialize;
use tf_provider::{AttributePath, Diagnostics};
use tf_provider::schema::{
    Attribute, AttributeConstraint, AttributeType, Block, Description, NestedBlock,
};
use tf_provider::value::Value;

/// Copy a field from the remote object into the state
pub type OnRead<S, A> = fn(&A, &mut S) -> Result<()>;
/// Copy a field from the state into an outgoing request
pub type OnWrite<S, A> = fn(&S, &mut A) -> Result<()>;

#[derive(Clone, Debug)]
pub enum FieldSchema {
    Attribute(Attribute),
    Block(NestedBlock),
}

pub struct Field<S, A> {
    pub name: &'static str,
    pub schema: FieldSchema,
    pub on_read: OnRead<S, A>,
    pub on_create: OnWrite<S, A>,
    /// `None` when the field cannot be updated in place
    pub on_update: Option<OnWrite<S, A>>,
}

impl<S, A> Field<S, A> {
    pub fn force_new(&self) -> bool {
        self.on_update.is_none()
    }
}

/// Values that may still hold unknowns after planning
pub trait Pending {
    fn is_pending(&self) -> bool;

    /// Whether the attribute `name` is unknown or holds an unknown value
    fn attribute_pending(&self, _name: &str) -> bool {
        false
    }
}

macro_rules! known {
    ($($ty:ty),*) => {
        $(impl Pending for $ty {
            fn is_pending(&self) -> bool {
                false
            }
        })*
    };
}

known!(String, i64, f64, bool);

impl<T: Pending> Pending for Value<T> {
    fn is_pending(&self) -> bool {
        match self {
            Value::Value(value) => value.is_pending(),
            Value::Null => false,
            Value::Unknown => true,
        }
    }
}

impl<T: Pending> Pending for Vec<T> {
    fn is_pending(&self) -> bool {
        self.iter().any(Pending::is_pending)
    }
}

impl<K, T: Pending> Pending for BTreeMap<K, T> {
    fn is_pending(&self) -> bool {
        self.values().any(Pending::is_pending)
    }
}

/// Implement [`Pending`] for a state struct from the list of its attributes
macro_rules! pending_attributes {
    ($state:ty { $($field:ident),* $(,)? }) => {
        impl $crate::fields::Pending for $state {
            fn is_pending(&self) -> bool {
                false $(|| $crate::fields::Pending::is_pending(&self.$field))*
            }

            fn attribute_pending(&self, name: &str) -> bool {
                match name {
                    $(stringify!($field) => $crate::fields::Pending::is_pending(&self.$field),)*
                    _ => false,
                }
            }
        }
    };
}
pub(crate) use pending_attributes;

/// Ordered table of the fields of a resource
pub struct Fields<S, A> {
    resource: &'static str,
    fields: Vec<Field<S, A>>,
}

impl<S, A> Fields<S, A> {
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            fields: Vec::new(),
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn attribute(
        &mut self,
        name: &'static str,
        attribute: Attribute,
        on_read: OnRead<S, A>,
        on_create: OnWrite<S, A>,
        on_update: Option<OnWrite<S, A>>,
    ) -> &mut Self {
        self.push(Field {
            name,
            schema: FieldSchema::Attribute(attribute),
            on_read,
            on_create,
            on_update,
        })
    }

    pub fn block(
        &mut self,
        name: &'static str,
        block: NestedBlock,
        on_read: OnRead<S, A>,
        on_create: OnWrite<S, A>,
        on_update: Option<OnWrite<S, A>>,
    ) -> &mut Self {
        self.push(Field {
            name,
            schema: FieldSchema::Block(block),
            on_read,
            on_create,
            on_update,
        })
    }

    pub fn push(&mut self, field: Field<S, A>) -> &mut Self {
        debug_assert!(
            self.get(field.name).is_none(),
            "field `{}` registered twice",
            field.name
        );
        self.fields.push(field);
        self
    }

    /// Append every field of another group
    pub fn extend(&mut self, other: Fields<S, A>) -> &mut Self {
        for field in other.fields {
            self.push(field);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Field<S, A>> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field<S, A>> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build the root block of the resource schema
    ///
    /// `extra` holds the attributes that are not managed by a field (eg: `id`).
    pub fn block_schema(
        &self,
        description: Description,
        extra: HashMap<String, Attribute>,
    ) -> Block {
        let mut attributes = extra;
        let mut blocks = HashMap::new();
        for field in &self.fields {
            match &field.schema {
                FieldSchema::Attribute(attribute) => {
                    attributes.insert(field.name.to_owned(), attribute.clone());
                }
                FieldSchema::Block(block) => {
                    blocks.insert(field.name.to_owned(), block.clone());
                }
            }
        }
        Block {
            version: 1,
            attributes,
            blocks,
            description,
            deprecated: false,
        }
    }

    /// Flatten the remote object into the state
    ///
    /// Every field is read even when a previous one failed.
    pub fn read(&self, diags: &mut Diagnostics, remote: &A, state: &mut S) -> Option<()> {
        let mut failed = false;
        for field in &self.fields {
            if let Err(err) = (field.on_read)(remote, state) {
                tracing::debug!("{} failed reading field {}: {err:#}", self.resource, field.name);
                diags.error(
                    format!("{} failed reading field {}", self.resource, field.name),
                    format!("{err:#}"),
                    AttributePath::new(field.name),
                );
                failed = true;
            }
        }
        (!failed).then_some(())
    }

    /// Build a creation request from the state
    pub fn expand_create(&self, diags: &mut Diagnostics, state: &S) -> Option<A>
    where
        A: Default,
    {
        let mut remote = A::default();
        let mut failed = false;
        for field in &self.fields {
            if let Err(err) = (field.on_create)(state, &mut remote) {
                self.expand_error(diags, field.name, err);
                failed = true;
            }
        }
        (!failed).then_some(remote)
    }

    /// Build an update request from the state
    ///
    /// Fields that cannot be updated in place are left out of the request.
    pub fn expand_update(&self, diags: &mut Diagnostics, state: &S) -> Option<A>
    where
        A: Default,
    {
        let mut remote = A::default();
        let mut failed = false;
        for field in &self.fields {
            let Some(on_update) = field.on_update else {
                continue;
            };
            if let Err(err) = on_update(state, &mut remote) {
                self.expand_error(diags, field.name, err);
                failed = true;
            }
        }
        (!failed).then_some(remote)
    }

    /// Attribute paths of the fields forcing a replacement between `prior` and `proposed`
    ///
    /// Two values are considered equal when they produce the same creation request.
    /// A value that is not known yet always forces the replacement.
    pub fn replace_triggers(&self, prior: &S, proposed: &S) -> Vec<AttributePath>
    where
        S: Pending,
        A: Default + Serialize,
    {
        self.fields
            .iter()
            .filter(|field| field.force_new())
            .filter(|field| {
                if proposed.attribute_pending(field.name) {
                    return true;
                }
                let expand = |state: &S| {
                    let mut remote = A::default();
                    (field.on_create)(state, &mut remote)
                        .ok()
                        .and_then(|()| serde_json::to_value(&remote).ok())
                };
                match (expand(prior), expand(proposed)) {
                    (Some(prior), Some(proposed)) => prior != proposed,
                    _ => true,
                }
            })
            .map(|field| AttributePath::new(field.name))
            .collect()
    }

    fn expand_error(&self, diags: &mut Diagnostics, name: &'static str, err: anyhow::Error) {
        tracing::debug!("{} failed expanding field {name}: {err:#}", self.resource);
        diags.error(
            format!("{} failed expanding field {name}", self.resource),
            format!("{err:#}"),
            AttributePath::new(name),
        );
    }
}

pub fn required(attr_type: AttributeType, description: &str) -> Attribute {
    with_constraint(attr_type, AttributeConstraint::Required, description)
}

pub fn optional(attr_type: AttributeType, description: &str) -> Attribute {
    with_constraint(attr_type, AttributeConstraint::Optional, description)
}

pub fn optional_computed(attr_type: AttributeType, description: &str) -> Attribute {
    with_constraint(attr_type, AttributeConstraint::OptionalComputed, description)
}

pub fn computed(attr_type: AttributeType, description: &str) -> Attribute {
    with_constraint(attr_type, AttributeConstraint::Computed, description)
}

fn with_constraint(
    attr_type: AttributeType,
    constraint: AttributeConstraint,
    description: &str,
) -> Attribute {
    Attribute {
        attr_type,
        description: Description::plain(description),
        constraint,
        ..Default::default()
    }
}

pub fn string_list() -> AttributeType {
    AttributeType::List(Box::new(AttributeType::String))
}

/// Nested block made of plain attributes
pub fn nested(description: &str, attributes: Vec<(&str, Attribute)>) -> Block {
    Block {
        attributes: attributes
            .into_iter()
            .map(|(name, attribute)| (name.to_owned(), attribute))
            .collect(),
        description: Description::plain(description),
        ..Default::default()
    }
}
