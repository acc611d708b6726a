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

//! `spotinst_aws_elastigroup` resource

use async_trait::async_trait;
use tf_provider::{map, AttributePath, Diagnostics, Resource};
use tf_provider::schema::{AttributeType, Description, Schema};
use tf_provider::value::{Value, ValueEmpty};

use crate::client::elastigroup::Group;
use crate::fields::{computed, Fields};
use crate::launch_configuration;
use crate::provider::{configured_client, SharedClient};

mod fields;
mod state;

pub use fields::ORIENTATIONS;
pub use state::{GroupState, TagState};

pub struct GroupResource {
    client: SharedClient,
    fields: Fields<GroupState, Group>,
}

impl GroupResource {
    pub fn new(client: SharedClient) -> Self {
        let mut fields = fields::fields();
        fields.extend(launch_configuration::fields());
        Self { client, fields }
    }

    pub fn fields(&self) -> &Fields<GroupState, Group> {
        &self.fields
    }

    /// Flatten an API response, reporting field errors as warnings
    ///
    /// Used after the group has been created or updated: failing there would lose track of it.
    fn remote_state(&self, diags: &mut Diagnostics, id: String, group: &Group) -> GroupState {
        let mut remote = GroupState {
            id: Value::Value(id),
            ..Default::default()
        };
        let mut read_diags = Diagnostics::default();
        _ = self.fields.read(&mut read_diags, group, &mut remote);
        for diag in read_diags.errors {
            diags.add_warning(diag);
        }
        remote
    }
}

fn group_id(diags: &mut Diagnostics, state: &GroupState) -> Option<String> {
    match state.id.as_deref_option() {
        Some(id) if !id.is_empty() => Some(id.to_owned()),
        _ => {
            diags.error_short("Elastigroup id is not known", AttributePath::new("id"));
            None
        }
    }
}

#[async_trait]
impl Resource for GroupResource {
    type State<'a> = GroupState;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(Schema {
            version: 1,
            block: self.fields.block_schema(
                Description::plain("Spotinst elastigroup on AWS"),
                map! {
                    "id" => computed(AttributeType::String, "ID of the elastigroup"),
                },
            ),
        })
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        if config.spot_percentage.is_value() && config.ondemand_count.is_value() {
            diags.error(
                "Conflicting attributes",
                "`spot_percentage` and `ondemand_count` cannot be set together",
                AttributePath::new("ondemand_count"),
            );
        }
        if let Some(risk) = config.spot_percentage.as_ref_option() {
            if !(0.0..=100.0).contains(risk) {
                diags.error(
                    "Invalid spot percentage",
                    format!("`spot_percentage` must be between 0 and 100, got {risk}"),
                    AttributePath::new("spot_percentage"),
                );
            }
        }
        if let Some(orientation) = config.orientation.as_deref_option() {
            if !ORIENTATIONS.contains(&orientation) {
                diags.error(
                    "Invalid orientation",
                    format!(
                        "`orientation` must be one of: {}, got `{orientation}`",
                        ORIENTATIONS.join(", ")
                    ),
                    AttributePath::new("orientation"),
                );
            }
        }
        for (name, value) in [
            ("max_size", &config.max_size),
            ("min_size", &config.min_size),
            ("desired_capacity", &config.desired_capacity),
        ] {
            if let Some(value) = value.as_ref_option() {
                if *value < 0 {
                    diags.error(
                        "Invalid capacity",
                        format!("`{name}` cannot be negative, got {value}"),
                        AttributePath::new(name),
                    );
                }
            }
        }

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = configured_client(&self.client, diags).await?;
        let id = group_id(diags, &state)?;

        tracing::debug!(id = %id, "reading elastigroup");
        let group = match client.elastigroup().read(&id).await {
            Ok(group) => group,
            Err(err) => {
                diags.root_error(format!("Failed to read elastigroup {id}"), err.to_string());
                return None;
            }
        };

        let mut state = state;
        self.fields.read(diags, &group, &mut state)?;
        Some((state, private_state))
    }

    async fn plan_create<'a>(
        &self,
        _diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = proposed_state;
        state.id = Value::Unknown;
        state.apply_defaults();
        state.mark_computed();
        Some((state, Default::default()))
    }

    async fn plan_update<'a>(
        &self,
        _diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(
        Self::State<'a>,
        Self::PrivateState<'a>,
        Vec<AttributePath>,
    )> {
        let mut state = proposed_state;
        state.id = prior_state.id.clone();
        state.apply_defaults();

        let trigger_replace = self.fields.replace_triggers(&prior_state, &state);
        if !trigger_replace.is_empty() {
            tracing::debug!(?trigger_replace, "elastigroup must be replaced");
        }
        Some((state, prior_private_state, trigger_replace))
    }

    async fn plan_destroy<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::PrivateState<'a>> {
        Some(prior_private_state)
    }

    async fn create<'a>(
        &self,
        diags: &mut Diagnostics,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = configured_client(&self.client, diags).await?;
        let request = self.fields.expand_create(diags, &planned_state)?;

        let group = match client.elastigroup().create(&request).await {
            Ok(group) => group,
            Err(err) => {
                diags.root_error("Failed to create elastigroup", err.to_string());
                return None;
            }
        };
        let Some(id) = group.id.clone() else {
            diags.root_error_short("Spotinst did not return the id of the new elastigroup");
            return None;
        };
        tracing::debug!(id = %id, "elastigroup created");

        let remote = self.remote_state(diags, id, &group);
        let mut state = planned_state;
        state.resolve_unknowns(&remote);
        Some((state, private_state))
    }

    async fn update<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = configured_client(&self.client, diags).await?;
        let id = group_id(diags, &prior_state)?;
        let request = self.fields.expand_update(diags, &planned_state)?;

        let group = match client.elastigroup().update(&id, &request).await {
            Ok(group) => group,
            Err(err) => {
                diags.root_error(format!("Failed to update elastigroup {id}"), err.to_string());
                return None;
            }
        };

        let remote = self.remote_state(diags, id, &group);
        let mut state = planned_state;
        state.id = prior_state.id;
        state.resolve_unknowns(&remote);
        Some((state, private_state))
    }

    async fn destroy<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        _planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        let client = configured_client(&self.client, diags).await?;
        let id = group_id(diags, &state)?;

        match client.elastigroup().delete(&id).await {
            Ok(()) => Some(()),
            Err(err) if err.is_not_found() => {
                tracing::debug!(id = %id, "elastigroup already deleted");
                Some(())
            }
            Err(err) => {
                diags.root_error(format!("Failed to delete elastigroup {id}"), err.to_string());
                None
            }
        }
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = configured_client(&self.client, diags).await?;

        let group = match client.elastigroup().read(&id).await {
            Ok(group) => group,
            Err(err) => {
                diags.root_error(format!("Failed to import elastigroup {id}"), err.to_string());
                return None;
            }
        };

        let mut state = GroupState {
            id: Value::Value(id),
            ..Default::default()
        };
        self.fields.read(diags, &group, &mut state)?;
        Some((state, Default::default()))
    }
}
