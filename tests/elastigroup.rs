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

mod common;

use mockito::Matcher;
use serde_json::json;
use terraform_provider_spotinst::elastigroup::{GroupResource, GroupState, TagState};
use tf_provider::{Diagnostics, Resource};
use tf_provider::value::Value;

use common::{items, shared_client};

fn config() -> GroupState {
    GroupState {
        name: Value::Value("web".to_owned()),
        product: Value::Value("Linux/UNIX".to_owned()),
        region: Value::Value("us-west-2".to_owned()),
        instance_types_ondemand: Value::Value("m3.medium".to_owned()),
        instance_types_spot: Value::Value(vec![Value::Value("m3.medium".to_owned())]),
        security_groups: Value::Value(vec![Value::Value("sg-1".to_owned())]),
        spot_percentage: Value::Value(100.0),
        ..Default::default()
    }
}

fn remote_group(name: &str) -> serde_json::Value {
    json!({
        "id": "sig-1",
        "name": name,
        "region": "us-west-2",
        "capacity": {"minimum": 0, "maximum": 2, "target": 1, "unit": "instance"},
        "strategy": {
            "risk": 100.0,
            "availabilityVsCost": "balanced",
            "fallbackToOd": true,
            "drainingTimeout": 120
        },
        "compute": {
            "product": "Linux/UNIX",
            "instanceTypes": {"ondemand": "m3.medium", "spot": ["m3.medium"]},
            "launchSpecification": {
                "securityGroupIds": ["sg-1"],
                "monitoring": false,
                "ebsOptimized": false
            }
        }
    })
}

#[tokio::test]
async fn lifecycle() {
    let mut server = mockito::Server::new_async().await;
    let resource = GroupResource::new(shared_client(&server));
    let mut diags = Diagnostics::default();

    let (planned, private) = resource
        .plan_create(&mut diags, config(), config(), Value::Null)
        .await
        .unwrap();
    assert!(planned.id.is_unknown());

    let create = server
        .mock("POST", "/aws/ec2/group")
        .match_query(Matcher::UrlEncoded("accountId".into(), "act-1".into()))
        .match_header("authorization", "Bearer secret")
        .match_body(Matcher::PartialJson(json!({
            "group": {
                "name": "web",
                "region": "us-west-2",
                "strategy": {"risk": 100.0, "availabilityVsCost": "balanced", "fallbackToOd": true},
                "compute": {
                    "product": "Linux/UNIX",
                    "launchSpecification": {"securityGroupIds": ["sg-1"]}
                }
            }
        })))
        .with_status(200)
        .with_body(items(remote_group("web")))
        .create_async()
        .await;
    let (created, private) = resource
        .create(&mut diags, planned, config(), private, Value::Null)
        .await
        .unwrap();
    create.assert_async().await;
    assert!(diags.errors.is_empty(), "{diags:?}");
    assert_eq!(created.id, Value::Value("sig-1".to_owned()));
    assert_eq!(created.max_size, Value::Value(2));
    assert_eq!(created.desired_capacity, Value::Value(1));
    assert_eq!(created.capacity_unit, Value::Value("instance".to_owned()));
    assert_eq!(created.draining_timeout, Value::Value(120));
    assert_eq!(created.ebs_optimized, Value::Value(false));

    let read = server
        .mock("GET", "/aws/ec2/group/sig-1")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(items(remote_group("web")))
        .create_async()
        .await;
    let (refreshed, private) = resource
        .read(&mut diags, created.clone(), private, Value::Null)
        .await
        .unwrap();
    read.assert_async().await;
    assert_eq!(refreshed, created);

    let proposed = GroupState {
        name: Value::Value("web-2".to_owned()),
        ..refreshed.clone()
    };
    let (planned, private, triggers) = resource
        .plan_update(
            &mut diags,
            refreshed.clone(),
            proposed.clone(),
            proposed,
            private,
            Value::Null,
        )
        .await
        .unwrap();
    assert!(triggers.is_empty());

    let update = server
        .mock("PUT", "/aws/ec2/group/sig-1")
        .match_query(Matcher::Any)
        .match_body(Matcher::PartialJson(json!({"group": {"name": "web-2"}})))
        .with_status(200)
        .with_body(items(remote_group("web-2")))
        .create_async()
        .await;
    let (updated, private) = resource
        .update(&mut diags, refreshed, planned, config(), private, Value::Null)
        .await
        .unwrap();
    update.assert_async().await;
    assert_eq!(updated.id, Value::Value("sig-1".to_owned()));
    assert_eq!(updated.name, Value::Value("web-2".to_owned()));

    let delete = server
        .mock("DELETE", "/aws/ec2/group/sig-1")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"response": {"status": {"code": 200}}}).to_string())
        .create_async()
        .await;
    assert!(resource
        .destroy(&mut diags, updated, private, Value::Null)
        .await
        .is_some());
    delete.assert_async().await;
    assert!(diags.errors.is_empty(), "{diags:?}");
}

#[tokio::test]
async fn read_missing_group() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/aws/ec2/group/sig-404")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let resource = GroupResource::new(shared_client(&server));
    let mut diags = Diagnostics::default();
    let state = GroupState {
        id: Value::Value("sig-404".to_owned()),
        ..config()
    };
    assert!(resource
        .read(&mut diags, state, Value::Null, Value::Null)
        .await
        .is_none());
    assert_eq!(diags.errors[0].summary, "Failed to read elastigroup sig-404");
    assert!(diags.errors[0].detail.contains("sig-404"));
}

#[tokio::test]
async fn destroy_missing_group() {
    let mut server = mockito::Server::new_async().await;
    let delete = server
        .mock("DELETE", "/aws/ec2/group/sig-404")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(
            json!({"response": {"errors": [{"code": "GROUP_DOESNT_EXIST", "message": "gone"}]}})
                .to_string(),
        )
        .create_async()
        .await;

    let resource = GroupResource::new(shared_client(&server));
    let mut diags = Diagnostics::default();
    let state = GroupState {
        id: Value::Value("sig-404".to_owned()),
        ..config()
    };
    assert!(resource
        .destroy(&mut diags, state, Value::Null, Value::Null)
        .await
        .is_some());
    delete.assert_async().await;
    assert!(diags.errors.is_empty());
}

#[tokio::test]
async fn import() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/aws/ec2/group/sig-1")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(items(remote_group("web")))
        .create_async()
        .await;

    let resource = GroupResource::new(shared_client(&server));
    let mut diags = Diagnostics::default();
    let (state, _) = resource
        .import(&mut diags, "sig-1".to_owned())
        .await
        .unwrap();
    assert_eq!(state.id, Value::Value("sig-1".to_owned()));
    assert_eq!(state.name, Value::Value("web".to_owned()));
    assert_eq!(state.product, Value::Value("Linux/UNIX".to_owned()));
    assert_eq!(state.spot_percentage, Value::Value(100.0));
    assert_eq!(state.orientation, Value::Value("balanced".to_owned()));
    assert_eq!(
        state.security_groups,
        Value::Value(vec![Value::Value("sg-1".to_owned())])
    );
}

#[tokio::test]
async fn update_clears_removed_values() {
    let mut server = mockito::Server::new_async().await;
    let update = server
        .mock("PUT", "/aws/ec2/group/sig-1")
        .match_query(Matcher::Any)
        .match_body(Matcher::PartialJson(json!({
            "group": {
                "description": null,
                "compute": {
                    "availabilityZones": null,
                    "subnetIds": null,
                    "launchSpecification": {"tags": []}
                }
            }
        })))
        .with_status(200)
        .with_body(items(remote_group("web")))
        .create_async()
        .await;

    let resource = GroupResource::new(shared_client(&server));
    let mut diags = Diagnostics::default();
    let prior = GroupState {
        id: Value::Value("sig-1".to_owned()),
        description: Value::Value("web servers".to_owned()),
        availability_zones: Value::Value(vec![Value::Value("us-west-2a".to_owned())]),
        subnet_ids: Value::Value(vec![Value::Value("subnet-1".to_owned())]),
        tags: Value::Value(vec![Value::Value(TagState {
            key: Value::Value("env".to_owned()),
            value: Value::Value("prod".to_owned()),
        })]),
        ..config()
    };
    let planned = GroupState {
        id: Value::Value("sig-1".to_owned()),
        ..config()
    };
    let (updated, _) = resource
        .update(&mut diags, prior, planned, config(), Value::Null, Value::Null)
        .await
        .unwrap();
    update.assert_async().await;
    assert!(diags.errors.is_empty(), "{diags:?}");
    assert!(updated.description.is_null());
    assert!(updated.tags.is_null());
}
