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

//! AWS EMR MRScaler endpoints: `/aws/emr/mrScaler`

use serde::{Deserialize, Serialize};

use super::common::{AvailabilityZone, Nullable, Tag};
use super::{ApiError, Client};

const SCALER_PATH: &str = "/aws/emr/mrScaler";

pub struct MrScalerApi<'a> {
    client: &'a Client,
}

impl<'a> MrScalerApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn create(&self, scaler: &Scaler) -> Result<Scaler, ApiError> {
        tracing::debug!(name = ?scaler.name, "creating MRScaler");
        self.client.create_item(SCALER_PATH, "mrScaler", scaler).await
    }

    pub async fn read(&self, id: &str) -> Result<Scaler, ApiError> {
        self.client
            .read_item(&format!("{SCALER_PATH}/{id}"))
            .await
            .map_err(|err| not_found(err, id))
    }

    pub async fn update(&self, id: &str, scaler: &Scaler) -> Result<Scaler, ApiError> {
        tracing::debug!(id, "updating MRScaler");
        self.client
            .update_item(&format!("{SCALER_PATH}/{id}"), "mrScaler", scaler)
            .await
            .map_err(|err| not_found(err, id))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        tracing::debug!(id, "deleting MRScaler");
        self.client
            .delete_item(&format!("{SCALER_PATH}/{id}"))
            .await
            .map_err(|err| not_found(err, id))
    }
}

fn not_found(err: ApiError, id: &str) -> ApiError {
    if err.is_not_found() {
        ApiError::NotFound(format!("MRScaler {id}"))
    } else {
        err
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scaler {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub description: Nullable<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Id of the EMR cluster managed by the scaler, reported by the API
    #[serde(default, skip_serializing)]
    pub output_cluster_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<ScalerStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute: Option<ScalerCompute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<ScalerCluster>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaling: Option<Scaling>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_scaling: Option<Scaling>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduling: Option<Scheduling>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalerStrategy {
    #[serde(rename = "new", skip_serializing_if = "Option::is_none")]
    pub new_cluster: Option<NewStrategy>,
    #[serde(rename = "clone", skip_serializing_if = "Option::is_none")]
    pub clone_cluster: Option<CloneStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapping: Option<WrapStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_timeout: Option<ProvisioningTimeout>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStrategy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_retries: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneStrategy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_cluster_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_retries: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_steps: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrapStrategy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_cluster_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningTimeout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_action: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalerCompute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zones: Option<Vec<AvailabilityZone>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_groups: Option<InstanceGroups>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ec2_key_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_ami_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_upgrade_on_boot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebs_root_volume_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_primary_security_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_replica_security_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_access_security_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_primary_security_groups: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_replica_security_groups: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applications: Option<Vec<Application>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<FileWrapper>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configurations: Option<FileWrapper>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootstrap_actions: Option<FileWrapper>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceGroups {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_group: Option<InstanceGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_group: Option<InstanceGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_group: Option<InstanceGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_types: Option<Vec<String>>,
    /// Only used by the master group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<InstanceGroupCapacity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_cycle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebs_configuration: Option<EbsConfiguration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceGroupCapacity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EbsConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebs_optimized: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebs_block_device_configs: Option<Vec<EbsBlockDeviceConfig>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EbsBlockDeviceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes_per_instance: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_specification: Option<VolumeSpecification>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSpecification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,
    #[serde(rename = "sizeInGB", skip_serializing_if = "Option::is_none")]
    pub size_in_gb: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iops: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileWrapper {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<S3File>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3File {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalerCluster {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_flow_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_configuration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_protected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_job_flow_alive_when_no_steps: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_to_all_users: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scaling {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up: Option<Vec<ScalingPolicy>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down: Option<Vec<ScalingPolicy>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation_periods: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooldown: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Vec<Dimension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ScalingAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Scaling action; the API carries every quantity as a string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingAction {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_target_capacity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_target_capacity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheduling {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<ScheduledTask>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_group_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_capacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_capacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<i64>,
}

impl Scaler {
    pub fn strategy_mut(&mut self) -> &mut ScalerStrategy {
        self.strategy.get_or_insert_with(Default::default)
    }

    pub fn compute_mut(&mut self) -> &mut ScalerCompute {
        self.compute.get_or_insert_with(Default::default)
    }

    pub fn cluster_mut(&mut self) -> &mut ScalerCluster {
        self.cluster.get_or_insert_with(Default::default)
    }

    pub fn compute(&self) -> Option<&ScalerCompute> {
        self.compute.as_ref()
    }

    pub fn cluster(&self) -> Option<&ScalerCluster> {
        self.cluster.as_ref()
    }

    pub fn strategy(&self) -> Option<&ScalerStrategy> {
        self.strategy.as_ref()
    }

    pub fn instance_groups(&self) -> Option<&InstanceGroups> {
        self.compute()?.instance_groups.as_ref()
    }

    pub fn instance_groups_mut(&mut self) -> &mut InstanceGroups {
        self.compute_mut()
            .instance_groups
            .get_or_insert_with(Default::default)
    }
}
