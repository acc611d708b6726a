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

use serde::{Deserialize, Serialize};
use tf_provider::value::{Value, ValueBool, ValueList, ValueNumber};

use crate::fields::pending_attributes;
use crate::utils::{default_if_null, resolve, unknown_if_null};

/// State of a `spotinst_aws_elastigroup`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GroupState {
    pub id: Value<String>,
    pub name: Value<String>,
    pub description: Value<String>,
    pub product: Value<String>,
    pub region: Value<String>,
    pub max_size: ValueNumber,
    pub min_size: ValueNumber,
    pub desired_capacity: ValueNumber,
    pub capacity_unit: Value<String>,
    pub instance_types_ondemand: Value<String>,
    pub instance_types_spot: ValueList<Value<String>>,
    pub availability_zones: ValueList<Value<String>>,
    pub subnet_ids: ValueList<Value<String>>,
    pub spot_percentage: Value<f64>,
    pub ondemand_count: ValueNumber,
    pub orientation: Value<String>,
    pub fallback_to_ondemand: ValueBool,
    pub draining_timeout: ValueNumber,
    pub tags: ValueList<Value<TagState>>,

    // launch configuration
    pub image_id: Value<String>,
    pub iam_instance_profile: Value<String>,
    pub key_name: Value<String>,
    pub security_groups: ValueList<Value<String>>,
    pub user_data: Value<String>,
    pub enable_monitoring: ValueBool,
    pub ebs_optimized: ValueBool,
    pub placement_tenancy: Value<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TagState {
    pub key: Value<String>,
    pub value: Value<String>,
}

pending_attributes!(GroupState {
    id,
    name,
    description,
    product,
    region,
    max_size,
    min_size,
    desired_capacity,
    capacity_unit,
    instance_types_ondemand,
    instance_types_spot,
    availability_zones,
    subnet_ids,
    spot_percentage,
    ondemand_count,
    orientation,
    fallback_to_ondemand,
    draining_timeout,
    tags,
    image_id,
    iam_instance_profile,
    key_name,
    security_groups,
    user_data,
    enable_monitoring,
    ebs_optimized,
    placement_tenancy,
});

pending_attributes!(TagState { key, value });

impl GroupState {
    /// Fill the values left unknown by the plan with the ones reported by the API
    pub fn resolve_unknowns(&mut self, remote: &GroupState) {
        resolve(&mut self.id, &remote.id);
        resolve(&mut self.max_size, &remote.max_size);
        resolve(&mut self.min_size, &remote.min_size);
        resolve(&mut self.desired_capacity, &remote.desired_capacity);
        resolve(&mut self.capacity_unit, &remote.capacity_unit);
        resolve(&mut self.orientation, &remote.orientation);
        resolve(&mut self.fallback_to_ondemand, &remote.fallback_to_ondemand);
        resolve(&mut self.draining_timeout, &remote.draining_timeout);
        resolve(&mut self.enable_monitoring, &remote.enable_monitoring);
        resolve(&mut self.ebs_optimized, &remote.ebs_optimized);
    }

    /// Mark the values computed by the API as unknown when they are not configured
    pub fn mark_computed(&mut self) {
        unknown_if_null(&mut self.max_size);
        unknown_if_null(&mut self.min_size);
        unknown_if_null(&mut self.desired_capacity);
        unknown_if_null(&mut self.capacity_unit);
        unknown_if_null(&mut self.draining_timeout);
        unknown_if_null(&mut self.ebs_optimized);
    }

    /// Apply the defaults of the optional attributes
    pub fn apply_defaults(&mut self) {
        default_if_null(&mut self.orientation, || "balanced".to_owned());
        default_if_null(&mut self.fallback_to_ondemand, || true);
        default_if_null(&mut self.enable_monitoring, || false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_computed() {
        let mut state = GroupState {
            max_size: Value::Value(4),
            orientation: Value::Value("costOriented".to_owned()),
            ..Default::default()
        };
        state.apply_defaults();
        state.mark_computed();

        assert_eq!(state.orientation, Value::Value("costOriented".to_owned()));
        assert_eq!(state.fallback_to_ondemand, Value::Value(true));
        assert_eq!(state.enable_monitoring, Value::Value(false));
        assert_eq!(state.max_size, Value::Value(4));
        assert!(state.min_size.is_unknown());
        assert!(state.ebs_optimized.is_unknown());
        // not computed
        assert!(state.description.is_null());
    }

    #[test]
    fn resolve_only_touches_unknowns() {
        let mut planned = GroupState {
            id: Value::Unknown,
            max_size: Value::Value(4),
            min_size: Value::Unknown,
            capacity_unit: Value::Unknown,
            ..Default::default()
        };
        let remote = GroupState {
            id: Value::Value("sig-1".to_owned()),
            max_size: Value::Value(10),
            min_size: Value::Value(1),
            capacity_unit: Value::Unknown,
            ..Default::default()
        };
        planned.resolve_unknowns(&remote);
        assert_eq!(planned.id, Value::Value("sig-1".to_owned()));
        assert_eq!(planned.max_size, Value::Value(4));
        assert_eq!(planned.min_size, Value::Value(1));
        assert_eq!(planned.capacity_unit, Value::Null);
    }
}
