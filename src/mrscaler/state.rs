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

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tf_provider::value::{self, Value, ValueBool, ValueList, ValueNumber};

use crate::elastigroup::TagState;
use crate::fields::pending_attributes;
use crate::utils::{default_if_null, resolve};

/// State of a `spotinst_mrscaler_aws`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScalerState {
    pub id: Value<String>,
    pub name: Value<String>,
    pub description: Value<String>,
    pub region: Value<String>,
    pub strategy: Value<String>,
    pub cluster_id: Value<String>,
    pub output_cluster_id: Value<String>,
    pub availability_zones: ValueList<Value<String>>,

    pub release_label: Value<String>,
    pub retries: ValueNumber,
    #[serde(with = "value::serde_as_vec")]
    pub provisioning_timeout: Value<ProvisioningTimeoutState>,

    pub log_uri: Value<String>,
    pub additional_info: Value<String>,
    pub job_flow_role: Value<String>,
    pub service_role: Value<String>,
    pub security_config: Value<String>,
    pub termination_protected: ValueBool,
    pub keep_job_flow_alive: ValueBool,
    pub visible_to_all_users: ValueBool,

    pub master_instance_types: ValueList<Value<String>>,
    pub master_lifecycle: Value<String>,
    pub master_ebs_optimized: ValueBool,
    pub master_ebs_block_device: ValueList<Value<EbsBlockDeviceState>>,
    pub master_target: ValueNumber,

    pub core_instance_types: ValueList<Value<String>>,
    pub core_lifecycle: Value<String>,
    pub core_ebs_optimized: ValueBool,
    pub core_ebs_block_device: ValueList<Value<EbsBlockDeviceState>>,
    pub core_min_size: ValueNumber,
    pub core_max_size: ValueNumber,
    pub core_desired_capacity: ValueNumber,

    pub task_instance_types: ValueList<Value<String>>,
    pub task_lifecycle: Value<String>,
    pub task_ebs_optimized: ValueBool,
    pub task_ebs_block_device: ValueList<Value<EbsBlockDeviceState>>,
    pub task_min_size: ValueNumber,
    pub task_max_size: ValueNumber,
    pub task_desired_capacity: ValueNumber,

    pub tags: ValueList<Value<TagState>>,

    pub custom_ami_id: Value<String>,
    pub repo_upgrade_on_boot: Value<String>,
    pub ec2_key_name: Value<String>,
    pub ebs_root_volume_size: ValueNumber,
    pub managed_primary_security_group: Value<String>,
    pub managed_replica_security_group: Value<String>,
    pub service_access_security_group: Value<String>,
    pub additional_primary_security_groups: ValueList<Value<String>>,
    pub additional_replica_security_groups: ValueList<Value<String>>,
    pub applications: ValueList<Value<ApplicationState>>,
    pub steps_file: ValueList<Value<S3FileState>>,
    pub configurations_file: ValueList<Value<S3FileState>>,
    pub bootstrap_actions_file: ValueList<Value<S3FileState>>,

    pub task_scaling_up_policy: ValueList<Value<ScalingPolicyState>>,
    pub task_scaling_down_policy: ValueList<Value<ScalingPolicyState>>,
    pub core_scaling_up_policy: ValueList<Value<ScalingPolicyState>>,
    pub core_scaling_down_policy: ValueList<Value<ScalingPolicyState>>,

    pub scheduled_task: ValueList<Value<ScheduledTaskState>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProvisioningTimeoutState {
    pub timeout: ValueNumber,
    pub timeout_action: Value<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EbsBlockDeviceState {
    pub volumes_per_instance: ValueNumber,
    pub volume_type: Value<String>,
    pub size_in_gb: ValueNumber,
    pub iops: ValueNumber,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ApplicationState {
    pub name: Value<String>,
    pub version: Value<String>,
    pub args: ValueList<Value<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct S3FileState {
    pub bucket: Value<String>,
    pub key: Value<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScalingPolicyState {
    pub policy_name: Value<String>,
    pub metric_name: Value<String>,
    pub namespace: Value<String>,
    pub statistic: Value<String>,
    pub unit: Value<String>,
    pub threshold: Value<f64>,
    pub period: ValueNumber,
    pub evaluation_periods: ValueNumber,
    pub cooldown: ValueNumber,
    pub operator: Value<String>,
    pub dimensions: Value<BTreeMap<String, Value<String>>>,
    pub action_type: Value<String>,
    pub adjustment: Value<String>,
    pub min_target_capacity: Value<String>,
    pub max_target_capacity: Value<String>,
    pub target: Value<String>,
    pub minimum: Value<String>,
    pub maximum: Value<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScheduledTaskState {
    pub is_enabled: ValueBool,
    pub task_type: Value<String>,
    pub instance_group_type: Value<String>,
    pub cron: Value<String>,
    pub desired_capacity: ValueNumber,
    pub min_capacity: ValueNumber,
    pub max_capacity: ValueNumber,
}

pending_attributes!(ScalerState {
    id,
    name,
    description,
    region,
    strategy,
    cluster_id,
    output_cluster_id,
    availability_zones,
    release_label,
    retries,
    provisioning_timeout,
    log_uri,
    additional_info,
    job_flow_role,
    service_role,
    security_config,
    termination_protected,
    keep_job_flow_alive,
    visible_to_all_users,
    master_instance_types,
    master_lifecycle,
    master_ebs_optimized,
    master_ebs_block_device,
    master_target,
    core_instance_types,
    core_lifecycle,
    core_ebs_optimized,
    core_ebs_block_device,
    core_min_size,
    core_max_size,
    core_desired_capacity,
    task_instance_types,
    task_lifecycle,
    task_ebs_optimized,
    task_ebs_block_device,
    task_min_size,
    task_max_size,
    task_desired_capacity,
    tags,
    custom_ami_id,
    repo_upgrade_on_boot,
    ec2_key_name,
    ebs_root_volume_size,
    managed_primary_security_group,
    managed_replica_security_group,
    service_access_security_group,
    additional_primary_security_groups,
    additional_replica_security_groups,
    applications,
    steps_file,
    configurations_file,
    bootstrap_actions_file,
    task_scaling_up_policy,
    task_scaling_down_policy,
    core_scaling_up_policy,
    core_scaling_down_policy,
    scheduled_task,
});

pending_attributes!(ProvisioningTimeoutState {
    timeout,
    timeout_action,
});

pending_attributes!(EbsBlockDeviceState {
    volumes_per_instance,
    volume_type,
    size_in_gb,
    iops,
});

pending_attributes!(ApplicationState {
    name,
    version,
    args,
});

pending_attributes!(S3FileState { bucket, key });

pending_attributes!(ScalingPolicyState {
    policy_name,
    metric_name,
    namespace,
    statistic,
    unit,
    threshold,
    period,
    evaluation_periods,
    cooldown,
    operator,
    dimensions,
    action_type,
    adjustment,
    min_target_capacity,
    max_target_capacity,
    target,
    minimum,
    maximum,
});

pending_attributes!(ScheduledTaskState {
    is_enabled,
    task_type,
    instance_group_type,
    cron,
    desired_capacity,
    min_capacity,
    max_capacity,
});

/// How the EMR cluster behind the scaler is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    New,
    Clone,
    Wrap,
}

impl Strategy {
    pub const NAMES: [&'static str; 3] = ["new", "clone", "wrap"];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "new" => Some(Strategy::New),
            "clone" => Some(Strategy::Clone),
            "wrap" => Some(Strategy::Wrap),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::New => "new",
            Strategy::Clone => "clone",
            Strategy::Wrap => "wrap",
        }
    }
}

impl ScalerState {
    pub fn strategy(&self) -> Option<Strategy> {
        self.strategy.as_deref_option().and_then(Strategy::parse)
    }

    pub fn resolve_unknowns(&mut self, remote: &ScalerState) {
        resolve(&mut self.id, &remote.id);
        resolve(&mut self.output_cluster_id, &remote.output_cluster_id);
    }
    /// Apply the defaults of the optional attributes of the nested blocks
    pub fn apply_defaults(&mut self) {
        if let Value::Value(tasks) = &mut self.scheduled_task {
            for task in tasks.iter_mut() {
                if let Value::Value(task) = task {
                    default_if_null(&mut task.is_enabled, || true);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategies() {
        for name in Strategy::NAMES {
            assert_eq!(Strategy::parse(name).map(Strategy::name), Some(name));
        }
        assert_eq!(Strategy::parse("copy"), None);

        let state = ScalerState {
            strategy: Value::Value("wrap".to_owned()),
            ..Default::default()
        };
        assert_eq!(state.strategy(), Some(Strategy::Wrap));
        assert_eq!(ScalerState::default().strategy(), None);
    }

    #[test]
    fn scheduled_tasks_are_enabled_by_default() {
        let task = |is_enabled| {
            Value::Value(ScheduledTaskState {
                is_enabled,
                task_type: Value::Value("setCapacity".to_owned()),
                ..Default::default()
            })
        };
        let mut state = ScalerState {
            scheduled_task: Value::Value(vec![
                task(Value::Null),
                task(Value::Value(false)),
                task(Value::Unknown),
            ]),
            ..Default::default()
        };
        state.apply_defaults();

        let enabled: Vec<_> = state
            .scheduled_task
            .as_ref_option()
            .unwrap()
            .iter()
            .flatten()
            .map(|task| task.is_enabled.clone())
            .collect();
        assert_eq!(
            enabled,
            vec![Value::Value(true), Value::Value(false), Value::Unknown]
        );

        let mut state = ScalerState::default();
        state.apply_defaults();
        assert!(state.scheduled_task.is_null());
    }
}
