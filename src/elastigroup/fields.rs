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

use anyhow::{bail, Result};
use tf_provider::schema::{AttributeType, NestedBlock};
use tf_provider::value::Value;

use crate::client::common::{AvailabilityZone, Nullable, Tag};
use crate::client::elastigroup::Group;
use crate::fields::{nested, optional, optional_computed, required, string_list, Fields};
use crate::utils::{
    join_zone, non_empty, optional_string, read_string, split_zone,
    string_list as collect_strings, to_string_list,
};

use super::state::{GroupState, TagState};

pub const ORIENTATIONS: [&str; 4] = [
    "balanced",
    "costOriented",
    "availabilityOriented",
    "equalAzDistribution",
];

/// Fields of the group itself (the launch configuration is a separate group)
pub fn fields() -> Fields<GroupState, Group> {
    let mut fields = Fields::<GroupState, Group>::new("elastigroup");
    fields
        .attribute(
            "name",
            required(AttributeType::String, "Name of the group"),
            |group, state| {
                state.name = optional_string(group.name.clone());
                Ok(())
            },
            write_name,
            Some(write_name),
        )
        .attribute(
            "description",
            optional(AttributeType::String, "Description of the group"),
            |group, state| {
                let description = group.description.as_option().cloned();
                state.description = read_string(&state.description, description);
                Ok(())
            },
            |state, group| {
                if let Some(description) = non_empty(&state.description) {
                    group.description = Nullable::Value(description.to_owned());
                }
                Ok(())
            },
            Some(|state, group| {
                group.description = non_empty(&state.description).map(ToOwned::to_owned).into();
                Ok(())
            }),
        )
        .attribute(
            "product",
            required(
                AttributeType::String,
                "Operating system of the instances (eg: Linux/UNIX)",
            ),
            |group, state| {
                state.product = optional_string(group.compute().and_then(|c| c.product.clone()));
                Ok(())
            },
            |state, group| {
                if let Some(product) = non_empty(&state.product) {
                    group.compute_mut().product = Some(product.to_owned());
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "region",
            optional(AttributeType::String, "AWS region of the group"),
            |group, state| {
                state.region = read_string(&state.region, group.region.clone());
                Ok(())
            },
            |state, group| {
                group.region = non_empty(&state.region).map(ToOwned::to_owned);
                Ok(())
            },
            None,
        )
        .attribute(
            "max_size",
            optional_computed(AttributeType::Number, "Maximal number of instances"),
            |group, state| {
                state.max_size = group.capacity().and_then(|c| c.maximum).into();
                Ok(())
            },
            write_max_size,
            Some(write_max_size),
        )
        .attribute(
            "min_size",
            optional_computed(AttributeType::Number, "Minimal number of instances"),
            |group, state| {
                state.min_size = group.capacity().and_then(|c| c.minimum).into();
                Ok(())
            },
            write_min_size,
            Some(write_min_size),
        )
        .attribute(
            "desired_capacity",
            optional_computed(AttributeType::Number, "Desired number of instances"),
            |group, state| {
                state.desired_capacity = group.capacity().and_then(|c| c.target).into();
                Ok(())
            },
            write_desired_capacity,
            Some(write_desired_capacity),
        )
        .attribute(
            "capacity_unit",
            optional_computed(
                AttributeType::String,
                "Unit of the capacity: instance or weight",
            ),
            |group, state| {
                let unit = group.capacity().and_then(|c| c.unit.clone());
                state.capacity_unit = read_string(&state.capacity_unit, unit);
                Ok(())
            },
            |state, group| {
                if let Some(unit) = non_empty(&state.capacity_unit) {
                    group.capacity_mut().unit = Some(unit.to_owned());
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "instance_types_ondemand",
            required(AttributeType::String, "Instance type of on-demand instances"),
            |group, state| {
                let ondemand = group
                    .compute()
                    .and_then(|c| c.instance_types.as_ref())
                    .and_then(|types| types.ondemand.clone());
                state.instance_types_ondemand = optional_string(ondemand);
                Ok(())
            },
            write_ondemand_type,
            Some(write_ondemand_type),
        )
        .attribute(
            "instance_types_spot",
            required(string_list(), "Instance types of spot instances"),
            |group, state| {
                let spot = group
                    .compute()
                    .and_then(|c| c.instance_types.as_ref())
                    .and_then(|types| types.spot.clone())
                    .unwrap_or_default();
                state.instance_types_spot = to_string_list(spot);
                Ok(())
            },
            write_spot_types,
            Some(write_spot_types),
        )
        .attribute(
            "availability_zones",
            optional(
                string_list(),
                "Availability zones of the group, as `zone` or `zone:subnet`",
            ),
            |group, state| {
                state.availability_zones = match group
                    .compute()
                    .and_then(|c| c.availability_zones.as_option())
                {
                    Some(zones) if !zones.is_empty() => to_string_list(zones.iter().map(|zone| {
                        join_zone(
                            zone.name.as_deref().unwrap_or_default(),
                            zone.subnet_id.as_deref(),
                        )
                    })),
                    _ => Value::Null,
                };
                Ok(())
            },
            |state, group| {
                if let Some(zones) = zones(state) {
                    group.compute_mut().availability_zones = Nullable::Value(zones);
                }
                Ok(())
            },
            Some(|state, group| {
                group.compute_mut().availability_zones = zones(state).into();
                Ok(())
            }),
        )
        .attribute(
            "subnet_ids",
            optional(string_list(), "Subnets of the group"),
            |group, state| {
                let subnets = group.compute().and_then(|c| c.subnet_ids.as_option());
                state.subnet_ids = match subnets {
                    Some(subnets) if !subnets.is_empty() => to_string_list(subnets.iter()),
                    _ => Value::Null,
                };
                Ok(())
            },
            |state, group| {
                if let Some(subnets) = collect_strings(&state.subnet_ids) {
                    group.compute_mut().subnet_ids = Nullable::Value(subnets);
                }
                Ok(())
            },
            Some(|state, group| {
                group.compute_mut().subnet_ids = collect_strings(&state.subnet_ids).into();
                Ok(())
            }),
        )
        .attribute(
            "spot_percentage",
            optional(
                AttributeType::Number,
                "Percentage of spot instances (conflicts with ondemand_count)",
            ),
            |group, state| {
                state.spot_percentage = group
                    .strategy()
                    .and_then(|s| s.risk.as_option().copied())
                    .into();
                Ok(())
            },
            |state, group| {
                if let Some(risk) = state.spot_percentage.as_ref_option() {
                    group.strategy_mut().risk = Nullable::Value(*risk);
                }
                Ok(())
            },
            Some(|state, group| {
                group.strategy_mut().risk = state.spot_percentage.as_ref_option().copied().into();
                Ok(())
            }),
        )
        .attribute(
            "ondemand_count",
            optional(
                AttributeType::Number,
                "Number of on-demand instances (conflicts with spot_percentage)",
            ),
            |group, state| {
                state.ondemand_count = group
                    .strategy()
                    .and_then(|s| s.on_demand_count.as_option().copied())
                    .into();
                Ok(())
            },
            |state, group| {
                if let Some(count) = state.ondemand_count.as_ref_option() {
                    group.strategy_mut().on_demand_count = Nullable::Value(*count);
                }
                Ok(())
            },
            Some(|state, group| {
                group.strategy_mut().on_demand_count =
                    state.ondemand_count.as_ref_option().copied().into();
                Ok(())
            }),
        )
        .attribute(
            "orientation",
            optional_computed(
                AttributeType::String,
                "Prediction strategy of the group (default: balanced)",
            ),
            |group, state| {
                state.orientation =
                    optional_string(group.strategy().and_then(|s| s.availability_vs_cost.clone()));
                Ok(())
            },
            write_orientation,
            Some(write_orientation),
        )
        .attribute(
            "fallback_to_ondemand",
            optional_computed(
                AttributeType::Bool,
                "Launch on-demand instances when no spot instance is available (default: true)",
            ),
            |group, state| {
                state.fallback_to_ondemand = group.strategy().and_then(|s| s.fallback_to_od).into();
                Ok(())
            },
            write_fallback,
            Some(write_fallback),
        )
        .attribute(
            "draining_timeout",
            optional_computed(
                AttributeType::Number,
                "Time in seconds to drain an instance before terminating it",
            ),
            |group, state| {
                state.draining_timeout = group.strategy().and_then(|s| s.draining_timeout).into();
                Ok(())
            },
            write_draining_timeout,
            Some(write_draining_timeout),
        )
        .block(
            "tags",
            NestedBlock::List(nested(
                "Tags of the instances",
                vec![
                    ("key", required(AttributeType::String, "Tag key")),
                    ("value", optional(AttributeType::String, "Tag value")),
                ],
            )),
            |group, state| {
                let tags = group
                    .launch_specification()
                    .and_then(|spec| spec.tags.as_ref())
                    .filter(|tags| !tags.is_empty());
                state.tags = match tags {
                    Some(tags) => Value::Value(
                        tags.iter()
                            .map(|tag| {
                                Value::Value(TagState {
                                    key: optional_string(tag.tag_key.clone()),
                                    value: optional_string(tag.tag_value.clone()),
                                })
                            })
                            .collect(),
                    ),
                    None => Value::Null,
                };
                Ok(())
            },
            |state, group| {
                if let Some(tags) = tags(state) {
                    group.launch_specification_mut().tags = Some(tags);
                }
                Ok(())
            },
            Some(|state, group| {
                // an empty list removes the tags
                group.launch_specification_mut().tags = Some(tags(state).unwrap_or_default());
                Ok(())
            }),
        );
    fields
}

fn write_name(state: &GroupState, group: &mut Group) -> Result<()> {
    group.name = non_empty(&state.name).map(ToOwned::to_owned);
    Ok(())
}

fn write_max_size(state: &GroupState, group: &mut Group) -> Result<()> {
    if let Some(max_size) = state.max_size.as_ref_option() {
        group.capacity_mut().maximum = Some(*max_size);
    }
    Ok(())
}

fn write_min_size(state: &GroupState, group: &mut Group) -> Result<()> {
    if let Some(min_size) = state.min_size.as_ref_option() {
        group.capacity_mut().minimum = Some(*min_size);
    }
    Ok(())
}

fn write_desired_capacity(state: &GroupState, group: &mut Group) -> Result<()> {
    if let Some(target) = state.desired_capacity.as_ref_option() {
        group.capacity_mut().target = Some(*target);
    }
    Ok(())
}

fn write_ondemand_type(state: &GroupState, group: &mut Group) -> Result<()> {
    if let Some(ondemand) = non_empty(&state.instance_types_ondemand) {
        group.compute_mut().instance_types_mut().ondemand = Some(ondemand.to_owned());
    }
    Ok(())
}

fn write_spot_types(state: &GroupState, group: &mut Group) -> Result<()> {
    if let Some(spot) = collect_strings(&state.instance_types_spot) {
        group.compute_mut().instance_types_mut().spot = Some(spot);
    }
    Ok(())
}

fn zones(state: &GroupState) -> Option<Vec<AvailabilityZone>> {
    let zones = collect_strings(&state.availability_zones)?;
    Some(
        zones
            .iter()
            .map(|zone| {
                let (name, subnet_id) = split_zone(zone);
                AvailabilityZone {
                    name: Some(name),
                    subnet_id,
                }
            })
            .collect(),
    )
}

fn write_orientation(state: &GroupState, group: &mut Group) -> Result<()> {
    if let Some(orientation) = non_empty(&state.orientation) {
        if !ORIENTATIONS.contains(&orientation) {
            bail!(
                "invalid orientation `{orientation}`, expected one of: {}",
                ORIENTATIONS.join(", ")
            );
        }
        group.strategy_mut().availability_vs_cost = Some(orientation.to_owned());
    }
    Ok(())
}

fn write_fallback(state: &GroupState, group: &mut Group) -> Result<()> {
    if let Some(fallback) = state.fallback_to_ondemand.as_ref_option() {
        group.strategy_mut().fallback_to_od = Some(*fallback);
    }
    Ok(())
}

fn write_draining_timeout(state: &GroupState, group: &mut Group) -> Result<()> {
    if let Some(timeout) = state.draining_timeout.as_ref_option() {
        group.strategy_mut().draining_timeout = Some(*timeout);
    }
    Ok(())
}

fn tags(state: &GroupState) -> Option<Vec<Tag>> {
    let tags = state.tags.as_ref_option()?;
    Some(
        tags.iter()
            .flatten()
            .map(|tag| Tag {
                tag_key: tag.key.as_ref_option().cloned(),
                tag_value: tag.value.as_ref_option().cloned(),
            })
            .collect(),
    )
}
