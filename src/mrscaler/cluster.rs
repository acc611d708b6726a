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

//! EMR cluster settings, fixed at creation

use tf_provider::schema::AttributeType;

use crate::client::mrscaler::Scaler;
use crate::fields::{optional, Fields};
use crate::utils::{non_empty_owned, optional_string};

use super::state::ScalerState;

pub fn fields() -> Fields<ScalerState, Scaler> {
    let mut fields = Fields::<ScalerState, Scaler>::new("mrscaler");
    fields
        .attribute(
            "log_uri",
            optional(AttributeType::String, "S3 path of the cluster logs"),
            |scaler, state| {
                state.log_uri = optional_string(scaler.cluster().and_then(|c| c.log_uri.clone()));
                Ok(())
            },
            |state, scaler| {
                if let Some(log_uri) = non_empty_owned(&state.log_uri) {
                    scaler.cluster_mut().log_uri = Some(log_uri);
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "additional_info",
            optional(AttributeType::String, "JSON string of additional cluster information"),
            |scaler, state| {
                state.additional_info =
                    optional_string(scaler.cluster().and_then(|c| c.additional_info.clone()));
                Ok(())
            },
            |state, scaler| {
                if let Some(info) = non_empty_owned(&state.additional_info) {
                    scaler.cluster_mut().additional_info = Some(info);
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "job_flow_role",
            optional(AttributeType::String, "IAM role of the cluster instances"),
            |scaler, state| {
                state.job_flow_role =
                    optional_string(scaler.cluster().and_then(|c| c.job_flow_role.clone()));
                Ok(())
            },
            |state, scaler| {
                if let Some(role) = non_empty_owned(&state.job_flow_role) {
                    scaler.cluster_mut().job_flow_role = Some(role);
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "service_role",
            optional(AttributeType::String, "IAM role assumed by the EMR service"),
            |scaler, state| {
                state.service_role =
                    optional_string(scaler.cluster().and_then(|c| c.service_role.clone()));
                Ok(())
            },
            |state, scaler| {
                if let Some(role) = non_empty_owned(&state.service_role) {
                    scaler.cluster_mut().service_role = Some(role);
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "security_config",
            optional(AttributeType::String, "Name of the EMR security configuration"),
            |scaler, state| {
                state.security_config = optional_string(
                    scaler
                        .cluster()
                        .and_then(|c| c.security_configuration.clone()),
                );
                Ok(())
            },
            |state, scaler| {
                if let Some(config) = non_empty_owned(&state.security_config) {
                    scaler.cluster_mut().security_configuration = Some(config);
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "termination_protected",
            optional(
                AttributeType::Bool,
                "Protect the cluster instances against termination",
            ),
            |scaler, state| {
                state.termination_protected =
                    scaler.cluster().and_then(|c| c.termination_protected).into();
                Ok(())
            },
            |state, scaler| {
                if let Some(protected) = state.termination_protected.as_ref_option() {
                    scaler.cluster_mut().termination_protected = Some(*protected);
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "keep_job_flow_alive",
            optional(
                AttributeType::Bool,
                "Keep the cluster alive when it has no more steps",
            ),
            |scaler, state| {
                state.keep_job_flow_alive = scaler
                    .cluster()
                    .and_then(|c| c.keep_job_flow_alive_when_no_steps)
                    .into();
                Ok(())
            },
            |state, scaler| {
                if let Some(keep_alive) = state.keep_job_flow_alive.as_ref_option() {
                    scaler.cluster_mut().keep_job_flow_alive_when_no_steps = Some(*keep_alive);
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "visible_to_all_users",
            optional(
                AttributeType::Bool,
                "Make the cluster visible to every IAM user of the account",
            ),
            |scaler, state| {
                state.visible_to_all_users =
                    scaler.cluster().and_then(|c| c.visible_to_all_users).into();
                Ok(())
            },
            |state, scaler| {
                if let Some(visible) = state.visible_to_all_users.as_ref_option() {
                    scaler.cluster_mut().visible_to_all_users = Some(*visible);
                }
                Ok(())
            },
            None,
        );
    fields
}
