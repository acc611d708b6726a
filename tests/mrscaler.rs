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
use terraform_provider_spotinst::mrscaler::{ScalerResource, ScalerState};
use tf_provider::{Diagnostics, Resource};
use tf_provider::value::Value;

use common::{items, shared_client};

fn strings(values: &[&str]) -> tf_provider::value::ValueList<Value<String>> {
    Value::Value(values.iter().map(|value| Value::Value(value.to_string())).collect())
}

fn config() -> ScalerState {
    ScalerState {
        name: Value::Value("emr".to_owned()),
        region: Value::Value("us-west-2".to_owned()),
        strategy: Value::Value("new".to_owned()),
        release_label: Value::Value("emr-5.17.0".to_owned()),
        availability_zones: strings(&["us-west-2a:subnet-1"]),
        master_instance_types: strings(&["m3.xlarge"]),
        master_lifecycle: Value::Value("ON_DEMAND".to_owned()),
        master_target: Value::Value(1),
        core_instance_types: strings(&["m3.xlarge"]),
        core_lifecycle: Value::Value("SPOT".to_owned()),
        core_min_size: Value::Value(1),
        core_max_size: Value::Value(4),
        core_desired_capacity: Value::Value(1),
        ..Default::default()
    }
}

fn remote_scaler(core_target: i64) -> serde_json::Value {
    json!({
        "id": "simrs-1",
        "name": "emr",
        "region": "us-west-2",
        "outputClusterId": "j-1",
        "strategy": {"new": {"releaseLabel": "emr-5.17.0"}},
        "compute": {
            "availabilityZones": [{"name": "us-west-2a", "subnetId": "subnet-1"}],
            "instanceGroups": {
                "masterGroup": {"instanceTypes": ["m3.xlarge"], "target": 1, "lifeCycle": "ON_DEMAND"},
                "coreGroup": {
                    "instanceTypes": ["m3.xlarge"],
                    "capacity": {"minimum": 1, "maximum": 4, "target": core_target},
                    "lifeCycle": "SPOT"
                }
            }
        }
    })
}

#[tokio::test]
async fn lifecycle() {
    let mut server = mockito::Server::new_async().await;
    let resource = ScalerResource::new(shared_client(&server));
    let mut diags = Diagnostics::default();

    let (planned, private) = resource
        .plan_create(&mut diags, config(), config(), Value::Null)
        .await
        .unwrap();
    assert!(planned.output_cluster_id.is_unknown());

    let create = server
        .mock("POST", "/aws/emr/mrScaler")
        .match_query(Matcher::UrlEncoded("accountId".into(), "act-1".into()))
        .match_body(Matcher::PartialJson(json!({
            "mrScaler": {
                "name": "emr",
                "strategy": {"new": {"releaseLabel": "emr-5.17.0"}},
                "compute": {
                    "availabilityZones": [{"name": "us-west-2a", "subnetId": "subnet-1"}],
                    "instanceGroups": {
                        "masterGroup": {"target": 1, "lifeCycle": "ON_DEMAND"},
                        "coreGroup": {"capacity": {"minimum": 1, "maximum": 4, "target": 1}}
                    }
                }
            }
        })))
        .with_status(200)
        .with_body(items(remote_scaler(1)))
        .create_async()
        .await;
    let (created, private) = resource
        .create(&mut diags, planned, config(), private, Value::Null)
        .await
        .unwrap();
    create.assert_async().await;
    assert!(diags.errors.is_empty(), "{diags:?}");
    assert_eq!(created.id, Value::Value("simrs-1".to_owned()));
    assert_eq!(created.output_cluster_id, Value::Value("j-1".to_owned()));

    let read = server
        .mock("GET", "/aws/emr/mrScaler/simrs-1")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(items(remote_scaler(1)))
        .create_async()
        .await;
    let (refreshed, private) = resource
        .read(&mut diags, created.clone(), private, Value::Null)
        .await
        .unwrap();
    read.assert_async().await;
    assert_eq!(refreshed.strategy, Value::Value("new".to_owned()));
    assert_eq!(refreshed.core_desired_capacity, Value::Value(1));
    assert_eq!(refreshed.master_lifecycle, Value::Value("ON_DEMAND".to_owned()));

    let proposed = ScalerState {
        core_desired_capacity: Value::Value(2),
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
    assert!(triggers.is_empty(), "{triggers:?}");

    let update = server
        .mock("PUT", "/aws/emr/mrScaler/simrs-1")
        .match_query(Matcher::Any)
        .match_body(Matcher::PartialJson(json!({
            "mrScaler": {
                "compute": {"instanceGroups": {"coreGroup": {"capacity": {"target": 2}}}},
                "scaling": {"up": [], "down": []}
            }
        })))
        .with_status(200)
        .with_body(items(remote_scaler(2)))
        .create_async()
        .await;
    let (updated, private) = resource
        .update(&mut diags, refreshed, planned, config(), private, Value::Null)
        .await
        .unwrap();
    update.assert_async().await;
    assert_eq!(updated.id, Value::Value("simrs-1".to_owned()));
    assert_eq!(updated.core_desired_capacity, Value::Value(2));

    let delete = server
        .mock("DELETE", "/aws/emr/mrScaler/simrs-1")
        .match_query(Matcher::Any)
        .with_status(404)
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
async fn create_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/aws/emr/mrScaler")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(
            json!({"response": {"errors": [{
                "code": "VALIDATION_ERROR",
                "message": "releaseLabel is invalid",
                "field": "strategy.new.releaseLabel"
            }]}})
            .to_string(),
        )
        .create_async()
        .await;

    let resource = ScalerResource::new(shared_client(&server));
    let mut diags = Diagnostics::default();
    assert!(resource
        .create(&mut diags, config(), config(), Value::Null, Value::Null)
        .await
        .is_none());
    assert_eq!(diags.errors[0].summary, "Failed to create mrscaler");
    assert!(diags.errors[0].detail.contains("VALIDATION_ERROR"));
}

#[tokio::test]
async fn import() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/aws/emr/mrScaler/simrs-1")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(items(remote_scaler(3)))
        .create_async()
        .await;

    let resource = ScalerResource::new(shared_client(&server));
    let mut diags = Diagnostics::default();
    let (state, _) = resource
        .import(&mut diags, "simrs-1".to_owned())
        .await
        .unwrap();
    assert_eq!(state.id, Value::Value("simrs-1".to_owned()));
    assert_eq!(state.output_cluster_id, Value::Value("j-1".to_owned()));
    assert_eq!(state.availability_zones, strings(&["us-west-2a:subnet-1"]));
    assert_eq!(state.core_desired_capacity, Value::Value(3));
    assert!(state.task_scaling_up_policy.is_null());
}

#[tokio::test]
async fn cloned_scaler_keeps_release_label() {
    let mut server = mockito::Server::new_async().await;
    let mut remote = remote_scaler(1);
    remote["strategy"] = json!({"clone": {"originClusterId": "j-0"}});
    server
        .mock("POST", "/aws/emr/mrScaler")
        .match_query(Matcher::Any)
        .match_body(Matcher::PartialJson(json!({
            "mrScaler": {"strategy": {"clone": {"originClusterId": "j-0"}}}
        })))
        .with_status(200)
        .with_body(items(remote.clone()))
        .create_async()
        .await;
    server
        .mock("GET", "/aws/emr/mrScaler/simrs-1")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(items(remote))
        .create_async()
        .await;

    let resource = ScalerResource::new(shared_client(&server));
    let mut diags = Diagnostics::default();
    let config = ScalerState {
        strategy: Value::Value("clone".to_owned()),
        cluster_id: Value::Value("j-0".to_owned()),
        ..config()
    };
    let (planned, private) = resource
        .plan_create(&mut diags, config.clone(), config.clone(), Value::Null)
        .await
        .unwrap();
    let (created, private) = resource
        .create(&mut diags, planned, config.clone(), private, Value::Null)
        .await
        .unwrap();
    let (refreshed, private) = resource
        .read(&mut diags, created.clone(), private, Value::Null)
        .await
        .unwrap();
    assert!(diags.errors.is_empty(), "{diags:?}");
    assert_eq!(refreshed.release_label, Value::Value("emr-5.17.0".to_owned()));
    assert_eq!(refreshed.cluster_id, Value::Value("j-0".to_owned()));

    let proposed = ScalerState {
        id: refreshed.id.clone(),
        output_cluster_id: refreshed.output_cluster_id.clone(),
        ..config.clone()
    };
    let (_, _, triggers) = resource
        .plan_update(&mut diags, refreshed, proposed, config, private, Value::Null)
        .await
        .unwrap();
    assert!(triggers.is_empty(), "{triggers:?}");
}

#[tokio::test]
async fn update_clears_description() {
    let mut server = mockito::Server::new_async().await;
    let update = server
        .mock("PUT", "/aws/emr/mrScaler/simrs-1")
        .match_query(Matcher::Any)
        .match_body(Matcher::PartialJson(json!({
            "mrScaler": {"name": "emr", "description": null}
        })))
        .with_status(200)
        .with_body(items(remote_scaler(1)))
        .create_async()
        .await;

    let resource = ScalerResource::new(shared_client(&server));
    let mut diags = Diagnostics::default();
    let prior = ScalerState {
        id: Value::Value("simrs-1".to_owned()),
        description: Value::Value("analytics".to_owned()),
        ..config()
    };
    let planned = ScalerState {
        id: Value::Value("simrs-1".to_owned()),
        ..config()
    };
    let (updated, _) = resource
        .update(&mut diags, prior, planned, config(), Value::Null, Value::Null)
        .await
        .unwrap();
    update.assert_async().await;
    assert!(diags.errors.is_empty(), "{diags:?}");
    assert!(updated.description.is_null());
}
