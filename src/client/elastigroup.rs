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

//! AWS elastigroup endpoints: `/aws/ec2/group`

use serde::{Deserialize, Serialize};

use super::common::{AvailabilityZone, Nullable, Tag};
use super::{ApiError, Client};

const GROUP_PATH: &str = "/aws/ec2/group";

pub struct ElastigroupApi<'a> {
    client: &'a Client,
}

impl<'a> ElastigroupApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn create(&self, group: &Group) -> Result<Group, ApiError> {
        tracing::debug!(name = ?group.name, "creating elastigroup");
        self.client.create_item(GROUP_PATH, "group", group).await
    }

    pub async fn read(&self, id: &str) -> Result<Group, ApiError> {
        self.client
            .read_item(&format!("{GROUP_PATH}/{id}"))
            .await
            .map_err(|err| not_found(err, id))
    }

    pub async fn update(&self, id: &str, group: &Group) -> Result<Group, ApiError> {
        tracing::debug!(id, "updating elastigroup");
        self.client
            .update_item(&format!("{GROUP_PATH}/{id}"), "group", group)
            .await
            .map_err(|err| not_found(err, id))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        tracing::debug!(id, "deleting elastigroup");
        self.client
            .delete_item(&format!("{GROUP_PATH}/{id}"))
            .await
            .map_err(|err| not_found(err, id))
    }
}

fn not_found(err: ApiError, id: &str) -> ApiError {
    if err.is_not_found() {
        ApiError::NotFound(format!("Elastigroup {id}"))
    } else {
        err
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub description: Nullable<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Capacity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute: Option<Compute>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capacity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub risk: Nullable<f64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub on_demand_count: Nullable<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_vs_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_to_od: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draining_timeout: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_types: Option<InstanceTypes>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub availability_zones: Nullable<Vec<AvailabilityZone>>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub subnet_ids: Nullable<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_specification: Option<LaunchSpecification>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceTypes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ondemand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchSpecification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_pair: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_group_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub user_data: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub iam_role: Nullable<IamInstanceProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebs_optimized: Option<bool>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub tenancy: Nullable<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IamInstanceProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
}

impl Group {
    pub fn capacity(&self) -> Option<&Capacity> {
        self.capacity.as_ref()
    }

    pub fn strategy(&self) -> Option<&Strategy> {
        self.strategy.as_ref()
    }

    pub fn compute(&self) -> Option<&Compute> {
        self.compute.as_ref()
    }

    pub fn launch_specification(&self) -> Option<&LaunchSpecification> {
        self.compute()?.launch_specification.as_ref()
    }

    pub fn capacity_mut(&mut self) -> &mut Capacity {
        self.capacity.get_or_insert_with(Default::default)
    }

    pub fn strategy_mut(&mut self) -> &mut Strategy {
        self.strategy.get_or_insert_with(Default::default)
    }

    pub fn compute_mut(&mut self) -> &mut Compute {
        self.compute.get_or_insert_with(Default::default)
    }

    pub fn launch_specification_mut(&mut self) -> &mut LaunchSpecification {
        self.compute_mut()
            .launch_specification
            .get_or_insert_with(Default::default)
    }
}

impl Compute {
    pub fn instance_types_mut(&mut self) -> &mut InstanceTypes {
        self.instance_types.get_or_insert_with(Default::default)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::{Credentials, RetryConfig};

    fn client(server: &mockito::Server) -> Client {
        Client::with_config(
            &Credentials {
                token: "secret".to_owned(),
                account: None,
                endpoint: Some(server.url()),
            },
            RetryConfig {
                max_retries: 0,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn wire_names() {
        let mut group = Group {
            name: Some("web".to_owned()),
            ..Default::default()
        };
        group.capacity_mut().target = Some(2);
        group.strategy_mut().on_demand_count = Nullable::Value(1);
        group.strategy_mut().risk = Nullable::Null;
        group.strategy_mut().fallback_to_od = Some(true);
        group.compute_mut().instance_types_mut().ondemand = Some("m5.large".to_owned());
        group.launch_specification_mut().image_id = Some("ami-1".to_owned());
        group.launch_specification_mut().iam_role = Nullable::Null;

        assert_eq!(
            serde_json::to_value(&group).unwrap(),
            json!({
                "name": "web",
                "capacity": {"target": 2},
                "strategy": {"risk": null, "onDemandCount": 1, "fallbackToOd": true},
                "compute": {
                    "instanceTypes": {"ondemand": "m5.large"},
                    "launchSpecification": {"imageId": "ami-1", "iamRole": null}
                }
            })
        );
    }

    #[tokio::test]
    async fn read_missing_group() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/aws/ec2/group/sig-404")
            .with_status(400)
            .with_body(
                json!({"response": {"errors": [{"code": "GROUP_DOESNT_EXIST", "message": "nope"}]}})
                    .to_string(),
            )
            .create_async()
            .await;

        let err = client(&server)
            .elastigroup()
            .read("sig-404")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Elastigroup sig-404 does not exist");
    }

    #[tokio::test]
    async fn create_returns_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/aws/ec2/group")
            .match_body(mockito::Matcher::PartialJson(
                json!({"group": {"name": "web"}}),
            ))
            .with_body(
                json!({"response": {"items": [{
                    "id": "sig-1",
                    "name": "web",
                    "createdAt": "2024-01-01T00:00:00.000Z"
                }]}})
                .to_string(),
            )
            .create_async()
            .await;

        let group = Group {
            name: Some("web".to_owned()),
            ..Default::default()
        };
        let created = client(&server).elastigroup().create(&group).await.unwrap();
        assert_eq!(created.id.as_deref(), Some("sig-1"));
        assert_eq!(created.name.as_deref(), Some("web"));
    }
}
