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

//! Identity, placement and provisioning strategy of the scaler

use anyhow::Result;
use tf_provider::schema::{AttributeType, NestedBlock};
use tf_provider::value::Value;

use crate::client::common::{AvailabilityZone, Nullable};
use crate::client::mrscaler::{
    CloneStrategy, NewStrategy, ProvisioningTimeout, Scaler, ScalerStrategy, WrapStrategy,
};
use crate::fields::{computed, nested, optional, required, string_list, Fields};
use crate::utils::{
    join_zone, non_empty_owned, optional_string, read_string, split_zone,
    string_list as collect_strings, to_string_list,
};

use super::state::{ProvisioningTimeoutState, ScalerState, Strategy};

pub fn fields() -> Fields<ScalerState, Scaler> {
    let mut fields = Fields::<ScalerState, Scaler>::new("mrscaler");
    fields
        .attribute(
            "name",
            required(AttributeType::String, "Name of the scaler"),
            |scaler, state| {
                state.name = optional_string(scaler.name.clone());
                Ok(())
            },
            write_name,
            Some(write_name),
        )
        .attribute(
            "description",
            optional(AttributeType::String, "Description of the scaler"),
            |scaler, state| {
                state.description =
                    read_string(&state.description, scaler.description.as_option().cloned());
                Ok(())
            },
            |state, scaler| {
                if let Some(description) = non_empty_owned(&state.description) {
                    scaler.description = Nullable::Value(description);
                }
                Ok(())
            },
            Some(|state, scaler| {
                scaler.description = non_empty_owned(&state.description).into();
                Ok(())
            }),
        )
        .attribute(
            "region",
            optional(AttributeType::String, "AWS region of the cluster"),
            |scaler, state| {
                state.region = optional_string(scaler.region.clone());
                Ok(())
            },
            |state, scaler| {
                scaler.region = non_empty_owned(&state.region);
                Ok(())
            },
            None,
        )
        .attribute(
            "strategy",
            required(
                AttributeType::String,
                "How the cluster is obtained: new, clone or wrap",
            ),
            |scaler, state| {
                let strategy = scaler.strategy().and_then(remote_strategy);
                state.strategy = optional_string(strategy.map(Strategy::name));
                Ok(())
            },
            |state, scaler| {
                let strategy = scaler.strategy_mut();
                match state.strategy() {
                    Some(Strategy::New) => {
                        strategy.new_cluster.get_or_insert_with(Default::default);
                    }
                    Some(Strategy::Clone) => {
                        strategy.clone_cluster.get_or_insert_with(Default::default);
                    }
                    Some(Strategy::Wrap) => {
                        strategy.wrapping.get_or_insert_with(Default::default);
                    }
                    None => (),
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "cluster_id",
            optional(
                AttributeType::String,
                "ID of the EMR cluster to clone or to wrap",
            ),
            |scaler, state| {
                let strategy = scaler.strategy();
                let cluster_id = strategy
                    .and_then(|s| s.clone_cluster.as_ref())
                    .and_then(|clone| clone.origin_cluster_id.clone())
                    .or_else(|| {
                        strategy
                            .and_then(|s| s.wrapping.as_ref())
                            .and_then(|wrap| wrap.source_cluster_id.clone())
                    });
                state.cluster_id = optional_string(cluster_id);
                Ok(())
            },
            |state, scaler| {
                let cluster_id = non_empty_owned(&state.cluster_id);
                if cluster_id.is_none() {
                    return Ok(());
                }
                match state.strategy() {
                    Some(Strategy::Clone) => {
                        clone_strategy(scaler).origin_cluster_id = cluster_id;
                    }
                    Some(Strategy::Wrap) => {
                        scaler.strategy_mut().wrapping = Some(WrapStrategy {
                            source_cluster_id: cluster_id,
                        });
                    }
                    _ => (),
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "output_cluster_id",
            computed(AttributeType::String, "ID of the EMR cluster managed by the scaler"),
            |scaler, state| {
                state.output_cluster_id = optional_string(scaler.output_cluster_id.clone());
                Ok(())
            },
            ignore,
            Some(ignore),
        )
        .attribute(
            "availability_zones",
            required(
                string_list(),
                "Availability zones of the cluster, as `zone:subnet`",
            ),
            |scaler, state| {
                let zones = scaler
                    .compute()
                    .and_then(|c| c.availability_zones.as_ref())
                    .map(|zones| {
                        zones
                            .iter()
                            .map(|zone| {
                                join_zone(
                                    zone.name.as_deref().unwrap_or_default(),
                                    zone.subnet_id.as_deref(),
                                )
                            })
                            .collect::<Vec<_>>()
                    });
                state.availability_zones = match zones {
                    Some(zones) if !zones.is_empty() => to_string_list(zones),
                    _ => Value::Null,
                };
                Ok(())
            },
            |state, scaler| {
                if let Some(zones) = collect_strings(&state.availability_zones) {
                    let zones = zones
                        .iter()
                        .map(|zone| {
                            let (name, subnet_id) = split_zone(zone);
                            AvailabilityZone {
                                name: Some(name),
                                subnet_id,
                            }
                        })
                        .collect();
                    scaler.compute_mut().availability_zones = Some(zones);
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "release_label",
            optional(
                AttributeType::String,
                "EMR release of a new cluster (eg: emr-5.17.0)",
            ),
            |scaler, state| {
                // only a new cluster carries a release label
                if let Some(new) = scaler.strategy().and_then(|s| s.new_cluster.as_ref()) {
                    state.release_label =
                        read_string(&state.release_label, new.release_label.clone());
                }
                Ok(())
            },
            |state, scaler| {
                if state.strategy() == Some(Strategy::New) {
                    if let Some(release_label) = non_empty_owned(&state.release_label) {
                        new_strategy(scaler).release_label = Some(release_label);
                    }
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "retries",
            optional(
                AttributeType::Number,
                "Number of provisioning retries of a new or cloned cluster",
            ),
            |scaler, state| {
                let Some(strategy) = scaler.strategy() else {
                    return Ok(());
                };
                if let Some(new) = strategy.new_cluster.as_ref() {
                    state.retries = new.number_of_retries.into();
                } else if let Some(clone) = strategy.clone_cluster.as_ref() {
                    state.retries = clone.number_of_retries.into();
                }
                Ok(())
            },
            |state, scaler| {
                let Some(retries) = state.retries.as_ref_option().copied() else {
                    return Ok(());
                };
                match state.strategy() {
                    Some(Strategy::New) => new_strategy(scaler).number_of_retries = Some(retries),
                    Some(Strategy::Clone) => {
                        clone_strategy(scaler).number_of_retries = Some(retries)
                    }
                    _ => (),
                }
                Ok(())
            },
            None,
        )
        .block(
            "provisioning_timeout",
            NestedBlock::Optional(nested(
                "Maximal provisioning time of the cluster",
                vec![
                    (
                        "timeout",
                        required(AttributeType::Number, "Timeout in minutes"),
                    ),
                    (
                        "timeout_action",
                        required(
                            AttributeType::String,
                            "Action when the timeout expires: terminate or terminateAndRetry",
                        ),
                    ),
                ],
            )),
            |scaler, state| {
                state.provisioning_timeout = scaler
                    .strategy()
                    .and_then(|s| s.provisioning_timeout.as_ref())
                    .map(|timeout| ProvisioningTimeoutState {
                        timeout: timeout.timeout.into(),
                        timeout_action: optional_string(timeout.timeout_action.clone()),
                    })
                    .into();
                Ok(())
            },
            |state, scaler| {
                if let Some(timeout) = state.provisioning_timeout.as_ref_option() {
                    scaler.strategy_mut().provisioning_timeout = Some(ProvisioningTimeout {
                        timeout: timeout.timeout.as_ref_option().copied(),
                        timeout_action: non_empty_owned(&timeout.timeout_action),
                    });
                }
                Ok(())
            },
            None,
        );
    fields
}

fn remote_strategy(strategy: &ScalerStrategy) -> Option<Strategy> {
    if strategy.wrapping.is_some() {
        Some(Strategy::Wrap)
    } else if strategy.clone_cluster.is_some() {
        Some(Strategy::Clone)
    } else if strategy.new_cluster.is_some() {
        Some(Strategy::New)
    } else {
        None
    }
}

fn new_strategy(scaler: &mut Scaler) -> &mut NewStrategy {
    scaler
        .strategy_mut()
        .new_cluster
        .get_or_insert_with(Default::default)
}

fn clone_strategy(scaler: &mut Scaler) -> &mut CloneStrategy {
    scaler
        .strategy_mut()
        .clone_cluster
        .get_or_insert_with(Default::default)
}

fn write_name(state: &ScalerState, scaler: &mut Scaler) -> Result<()> {
    scaler.name = non_empty_owned(&state.name);
    Ok(())
}

fn ignore(_state: &ScalerState, _scaler: &mut Scaler) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tf_provider::Diagnostics;

    use super::*;

    fn state(strategy: &str) -> ScalerState {
        ScalerState {
            name: Value::Value("emr".to_owned()),
            region: Value::Value("us-west-2".to_owned()),
            strategy: Value::Value(strategy.to_owned()),
            cluster_id: Value::Value("j-1".to_owned()),
            availability_zones: to_string_list(["us-west-2b:subnet-1ba25052"]),
            release_label: Value::Value("emr-5.17.0".to_owned()),
            retries: Value::Value(2),
            provisioning_timeout: Value::Value(ProvisioningTimeoutState {
                timeout: Value::Value(15),
                timeout_action: Value::Value("terminate".to_owned()),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn new_cluster() {
        let mut diags = Diagnostics::default();
        let mut state = state("new");
        state.cluster_id = Value::Null;
        let scaler = fields().expand_create(&mut diags, &state).unwrap();
        assert_eq!(
            serde_json::to_value(&scaler).unwrap(),
            json!({
                "name": "emr",
                "region": "us-west-2",
                "strategy": {
                    "new": {"releaseLabel": "emr-5.17.0", "numberOfRetries": 2},
                    "provisioningTimeout": {"timeout": 15, "timeoutAction": "terminate"}
                },
                "compute": {"availabilityZones": [{"name": "us-west-2b", "subnetId": "subnet-1ba25052"}]}
            })
        );

        let mut read = ScalerState::default();
        fields().read(&mut diags, &scaler, &mut read).unwrap();
        assert_eq!(read, state);
    }

    #[test]
    fn clone_cluster() {
        let mut diags = Diagnostics::default();
        let scaler = fields().expand_create(&mut diags, &state("clone")).unwrap();
        let strategy = serde_json::to_value(scaler.strategy.as_ref().unwrap()).unwrap();
        assert_eq!(strategy["clone"], json!({"originClusterId": "j-1", "numberOfRetries": 2}));
        assert!(strategy.get("new").is_none());

        let mut read = ScalerState::default();
        fields().read(&mut diags, &scaler, &mut read).unwrap();
        assert_eq!(read.strategy, Value::Value("clone".to_owned()));
        assert_eq!(read.cluster_id, Value::Value("j-1".to_owned()));
        assert!(read.release_label.is_null());
        assert_eq!(read.retries, Value::Value(2));
    }

    #[test]
    fn clone_keeps_configured_release_label() {
        let mut diags = Diagnostics::default();
        let state = state("clone");
        let scaler = fields().expand_create(&mut diags, &state).unwrap();

        let mut read = state.clone();
        fields().read(&mut diags, &scaler, &mut read).unwrap();
        assert_eq!(read, state);
        assert!(fields()
            .replace_triggers(&state, &read)
            .is_empty());
    }

    #[test]
    fn wrap_keeps_configured_retries() {
        let mut diags = Diagnostics::default();
        let state = state("wrap");
        let scaler = fields().expand_create(&mut diags, &state).unwrap();

        let mut read = state.clone();
        fields().read(&mut diags, &scaler, &mut read).unwrap();
        assert_eq!(read.retries, Value::Value(2));
        assert_eq!(read.release_label, Value::Value("emr-5.17.0".to_owned()));
        assert_eq!(read, state);
    }

    #[test]
    fn wrap_cluster() {
        let mut diags = Diagnostics::default();
        let scaler = fields().expand_create(&mut diags, &state("wrap")).unwrap();
        let strategy = serde_json::to_value(scaler.strategy.as_ref().unwrap()).unwrap();
        assert_eq!(strategy["wrapping"], json!({"sourceClusterId": "j-1"}));
        assert!(strategy.get("new").is_none());
        assert!(strategy.get("clone").is_none());
    }

    #[test]
    fn only_name_and_description_are_updatable() {
        let mut diags = Diagnostics::default();
        let scaler = fields().expand_update(&mut diags, &state("new")).unwrap();
        assert_eq!(
            serde_json::to_value(&scaler).unwrap(),
            json!({"name": "emr", "description": null})
        );

        let mut state = state("new");
        state.description = Value::Value("analytics".to_owned());
        let scaler = fields().expand_update(&mut diags, &state).unwrap();
        assert_eq!(
            serde_json::to_value(&scaler).unwrap(),
            json!({"name": "emr", "description": "analytics"})
        );
    }
}
