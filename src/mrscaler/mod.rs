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

//! `spotinst_mrscaler_aws` resource

use async_trait::async_trait;
use tf_provider::{map, AttributePath, Diagnostics, Resource};
use tf_provider::schema::{AttributeType, Description, Schema};
use tf_provider::value::{Value, ValueEmpty};

use crate::client::mrscaler::Scaler;
use crate::fields::{computed, Fields};
use crate::provider::{configured_client, SharedClient};

mod baseline;
mod cluster;
mod instance_groups;
mod optional;
mod scaling;
mod state;

pub use instance_groups::LIFECYCLES;
pub use scaling::ACTION_TYPES;
pub use state::{
    ApplicationState, EbsBlockDeviceState, ProvisioningTimeoutState, S3FileState, ScalerState,
    ScalingPolicyState, ScheduledTaskState, Strategy,
};

pub struct ScalerResource {
    client: SharedClient,
    fields: Fields<ScalerState, Scaler>,
}

impl ScalerResource {
    pub fn new(client: SharedClient) -> Self {
        let mut fields = baseline::fields();
        fields
            .extend(cluster::fields())
            .extend(instance_groups::fields())
            .extend(optional::fields())
            .extend(scaling::fields());
        Self { client, fields }
    }

    pub fn fields(&self) -> &Fields<ScalerState, Scaler> {
        &self.fields
    }

    fn remote_state(&self, diags: &mut Diagnostics, id: String, scaler: &Scaler) -> ScalerState {
        let mut remote = ScalerState {
            id: Value::Value(id),
            ..Default::default()
        };
        let mut read_diags = Diagnostics::default();
        _ = self.fields.read(&mut read_diags, scaler, &mut remote);
        for diag in read_diags.errors {
            diags.add_warning(diag);
        }
        remote
    }
}

fn scaler_id(diags: &mut Diagnostics, state: &ScalerState) -> Option<String> {
    match state.id.as_deref_option() {
        Some(id) if !id.is_empty() => Some(id.to_owned()),
        _ => {
            diags.error_short("MRScaler id is not known", AttributePath::new("id"));
            None
        }
    }
}

#[async_trait]
impl Resource for ScalerResource {
    type State<'a> = ScalerState;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(Schema {
            version: 1,
            block: self.fields.block_schema(
                Description::plain("Spotinst MRScaler on AWS"),
                map! {
                    "id" => computed(AttributeType::String, "ID of the scaler"),
                },
            ),
        })
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        if let Some(name) = config.strategy.as_deref_option() {
            match Strategy::parse(name) {
                None => diags.error(
                    "Invalid strategy",
                    format!(
                        "`strategy` must be one of: {}, got `{name}`",
                        Strategy::NAMES.join(", ")
                    ),
                    AttributePath::new("strategy"),
                ),
                Some(Strategy::Clone | Strategy::Wrap) if config.cluster_id.is_null() => diags
                    .error(
                        "Missing cluster id",
                        format!("`cluster_id` is required with the `{name}` strategy"),
                        AttributePath::new("cluster_id"),
                    ),
                Some(Strategy::Clone | Strategy::Wrap) if config.release_label.is_value() => {
                    diags.warning(
                        "Ignored release label",
                        format!("`release_label` is only used by the `new` strategy, not `{name}`"),
                        AttributePath::new("release_label"),
                    )
                }
                Some(_) => (),
            }
        }

        for (name, lifecycle) in [
            ("master_lifecycle", &config.master_lifecycle),
            ("core_lifecycle", &config.core_lifecycle),
            ("task_lifecycle", &config.task_lifecycle),
        ] {
            if let Some(lifecycle) = lifecycle.as_deref_option() {
                if !LIFECYCLES.contains(&lifecycle) {
                    diags.error(
                        "Invalid lifecycle",
                        format!(
                            "`{name}` must be one of: {}, got `{lifecycle}`",
                            LIFECYCLES.join(", ")
                        ),
                        AttributePath::new(name),
                    );
                }
            }
        }

        for (name, policies) in [
            ("task_scaling_up_policy", &config.task_scaling_up_policy),
            ("task_scaling_down_policy", &config.task_scaling_down_policy),
            ("core_scaling_up_policy", &config.core_scaling_up_policy),
            ("core_scaling_down_policy", &config.core_scaling_down_policy),
        ] {
            for (i, policy) in policies.as_ref_option().into_iter().flatten().enumerate() {
                let Value::Value(policy) = policy else {
                    continue;
                };
                if let Some(action_type) = policy.action_type.as_deref_option() {
                    if !ACTION_TYPES.contains(&action_type) {
                        diags.error(
                            "Invalid action type",
                            format!(
                                "`action_type` must be one of: {}, got `{action_type}`",
                                ACTION_TYPES.join(", ")
                            ),
                            AttributePath::new(name).index(i as i64).attribute("action_type"),
                        );
                    }
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
        let id = scaler_id(diags, &state)?;

        tracing::debug!(id = %id, "reading mrscaler");
        let scaler = match client.mrscaler().read(&id).await {
            Ok(scaler) => scaler,
            Err(err) => {
                diags.root_error(format!("Failed to read mrscaler {id}"), err.to_string());
                return None;
            }
        };

        let mut state = state;
        self.fields.read(diags, &scaler, &mut state)?;
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
        state.output_cluster_id = Value::Unknown;
        state.apply_defaults();
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
        state.output_cluster_id = prior_state.output_cluster_id.clone();
        state.apply_defaults();

        let trigger_replace = self.fields.replace_triggers(&prior_state, &state);
        if !trigger_replace.is_empty() {
            tracing::debug!(?trigger_replace, "mrscaler must be replaced");
            state.output_cluster_id = Value::Unknown;
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

        let scaler = match client.mrscaler().create(&request).await {
            Ok(scaler) => scaler,
            Err(err) => {
                diags.root_error("Failed to create mrscaler", err.to_string());
                return None;
            }
        };
        let Some(id) = scaler.id.clone() else {
            diags.root_error_short("Spotinst did not return the id of the new mrscaler");
            return None;
        };
        tracing::debug!(id = %id, "mrscaler created");

        let remote = self.remote_state(diags, id, &scaler);
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
        let id = scaler_id(diags, &prior_state)?;
        let request = self.fields.expand_update(diags, &planned_state)?;

        let scaler = match client.mrscaler().update(&id, &request).await {
            Ok(scaler) => scaler,
            Err(err) => {
                diags.root_error(format!("Failed to update mrscaler {id}"), err.to_string());
                return None;
            }
        };

        let remote = self.remote_state(diags, id, &scaler);
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
        let id = scaler_id(diags, &state)?;

        match client.mrscaler().delete(&id).await {
            Ok(()) => Some(()),
            Err(err) if err.is_not_found() => {
                tracing::debug!(id = %id, "mrscaler already deleted");
                Some(())
            }
            Err(err) => {
                diags.root_error(format!("Failed to delete mrscaler {id}"), err.to_string());
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

        let scaler = match client.mrscaler().read(&id).await {
            Ok(scaler) => scaler,
            Err(err) => {
                diags.root_error(format!("Failed to import mrscaler {id}"), err.to_string());
                return None;
            }
        };

        let mut state = ScalerState {
            id: Value::Value(id),
            ..Default::default()
        };
        self.fields.read(diags, &scaler, &mut state)?;
        Some((state, Default::default()))
    }
}
