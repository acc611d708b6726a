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

//! Launch configuration of an elastigroup
//!
//! These fields live in `compute.launchSpecification` of the group.

use anyhow::Result;
use tf_provider::schema::AttributeType;
use tf_provider::value::Value;

use crate::client::common::Nullable;
use crate::client::elastigroup::{Group, IamInstanceProfile};
use crate::elastigroup::GroupState;
use crate::fields::{optional, optional_computed, required, string_list, Fields};
use crate::utils::{
    base64_decode, base64_encode, instance_profile_arn_regex, non_empty, read_string,
    string_list as collect_strings, to_string_list,
};

pub fn fields() -> Fields<GroupState, Group> {
    let mut fields = Fields::<GroupState, Group>::new("elastigroup");
    fields
        .attribute(
            "image_id",
            optional(AttributeType::String, "ID of the AMI used to launch the instances"),
            |group, state| {
                let image_id = group.launch_specification().and_then(|spec| spec.image_id.clone());
                state.image_id = read_string(&state.image_id, image_id);
                Ok(())
            },
            write_image_id,
            Some(write_image_id),
        )
        .attribute(
            "iam_instance_profile",
            optional(
                AttributeType::String,
                "IAM instance profile, either by name or by ARN",
            ),
            |group, state| {
                let profile = group
                    .launch_specification()
                    .and_then(|spec| spec.iam_role.as_option())
                    .and_then(|role| role.arn.clone().or_else(|| role.name.clone()));
                state.iam_instance_profile = read_string(&state.iam_instance_profile, profile);
                Ok(())
            },
            |state, group| {
                if let Some(profile) = non_empty(&state.iam_instance_profile) {
                    group.launch_specification_mut().iam_role =
                        Nullable::Value(instance_profile(profile));
                }
                Ok(())
            },
            Some(|state, group| {
                group.launch_specification_mut().iam_role =
                    non_empty(&state.iam_instance_profile)
                        .map(instance_profile)
                        .into();
                Ok(())
            }),
        )
        .attribute(
            "key_name",
            optional(AttributeType::String, "Name of the key pair"),
            |group, state| {
                let key_pair = group.launch_specification().and_then(|spec| spec.key_pair.clone());
                state.key_name = read_string(&state.key_name, key_pair);
                Ok(())
            },
            write_key_name,
            Some(write_key_name),
        )
        .attribute(
            "security_groups",
            required(string_list(), "IDs of the security groups of the instances"),
            |group, state| {
                let security_groups = group
                    .launch_specification()
                    .and_then(|spec| spec.security_group_ids.clone())
                    .unwrap_or_default();
                state.security_groups = to_string_list(security_groups);
                Ok(())
            },
            write_security_groups,
            Some(write_security_groups),
        )
        .attribute(
            "user_data",
            optional(AttributeType::String, "User data given to the instances"),
            read_user_data,
            |state, group| {
                if let Some(user_data) = non_empty(&state.user_data) {
                    group.launch_specification_mut().user_data =
                        Nullable::Value(base64_encode(user_data));
                }
                Ok(())
            },
            Some(|state, group| {
                group.launch_specification_mut().user_data =
                    non_empty(&state.user_data).map(base64_encode).into();
                Ok(())
            }),
        )
        .attribute(
            "enable_monitoring",
            optional_computed(
                AttributeType::Bool,
                "Enable detailed monitoring of the instances (default: false)",
            ),
            |group, state| {
                let monitoring = group.launch_specification().and_then(|spec| spec.monitoring);
                state.enable_monitoring = Value::Value(monitoring.unwrap_or(false));
                Ok(())
            },
            write_monitoring,
            Some(write_monitoring),
        )
        .attribute(
            "ebs_optimized",
            optional_computed(AttributeType::Bool, "Launch EBS optimized instances"),
            |group, state| {
                let ebs_optimized = group.launch_specification().and_then(|spec| spec.ebs_optimized);
                state.ebs_optimized = ebs_optimized.into();
                Ok(())
            },
            write_ebs_optimized,
            Some(write_ebs_optimized),
        )
        .attribute(
            "placement_tenancy",
            optional(
                AttributeType::String,
                "Tenancy of the instances: default or dedicated",
            ),
            |group, state| {
                let tenancy = group
                    .launch_specification()
                    .and_then(|spec| spec.tenancy.as_option().cloned());
                state.placement_tenancy = read_string(&state.placement_tenancy, tenancy);
                Ok(())
            },
            |state, group| {
                if let Some(tenancy) = non_empty(&state.placement_tenancy) {
                    group.launch_specification_mut().tenancy = Nullable::Value(tenancy.to_owned());
                }
                Ok(())
            },
            Some(|state, group| {
                group.launch_specification_mut().tenancy = non_empty(&state.placement_tenancy)
                    .map(ToOwned::to_owned)
                    .into();
                Ok(())
            }),
        );
    fields
}

/// Profiles given as an ARN are sent as such, anything else is a profile name
fn instance_profile(profile: &str) -> IamInstanceProfile {
    if instance_profile_arn_regex().is_match(profile) {
        IamInstanceProfile {
            arn: Some(profile.to_owned()),
            name: None,
        }
    } else {
        IamInstanceProfile {
            arn: None,
            name: Some(profile.to_owned()),
        }
    }
}

/// The API stores the encoded user data, the state keeps what the user wrote
fn read_user_data(group: &Group, state: &mut GroupState) -> Result<()> {
    let remote = group
        .launch_specification()
        .and_then(|spec| spec.user_data.as_option())
        .filter(|user_data| !user_data.is_empty());

    let Some(remote) = remote else {
        if non_empty(&state.user_data).is_some() || state.user_data.is_unknown() {
            state.user_data = Value::Null;
        }
        return Ok(());
    };

    let unchanged = non_empty(&state.user_data)
        .map(|user_data| base64_encode(user_data) == *remote)
        .unwrap_or(false);
    if !unchanged {
        state.user_data = Value::Value(base64_decode(remote));
    }
    Ok(())
}

fn write_image_id(state: &GroupState, group: &mut Group) -> Result<()> {
    if let Some(image_id) = non_empty(&state.image_id) {
        group.launch_specification_mut().image_id = Some(image_id.to_owned());
    }
    Ok(())
}

fn write_key_name(state: &GroupState, group: &mut Group) -> Result<()> {
    if let Some(key_name) = non_empty(&state.key_name) {
        group.launch_specification_mut().key_pair = Some(key_name.to_owned());
    }
    Ok(())
}

fn write_security_groups(state: &GroupState, group: &mut Group) -> Result<()> {
    if let Some(security_groups) = collect_strings(&state.security_groups) {
        group.launch_specification_mut().security_group_ids = Some(security_groups);
    }
    Ok(())
}

fn write_monitoring(state: &GroupState, group: &mut Group) -> Result<()> {
    if let Some(monitoring) = state.enable_monitoring.as_ref_option() {
        group.launch_specification_mut().monitoring = Some(*monitoring);
    }
    Ok(())
}

fn write_ebs_optimized(state: &GroupState, group: &mut Group) -> Result<()> {
    if let Some(ebs_optimized) = state.ebs_optimized.as_ref_option() {
        group.launch_specification_mut().ebs_optimized = Some(*ebs_optimized);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tf_provider::Diagnostics;

    use super::*;

    fn state() -> GroupState {
        GroupState {
            image_id: Value::Value("ami-79826301".to_owned()),
            iam_instance_profile: Value::Value(
                "arn:aws:iam::123456789012:instance-profile/web".to_owned(),
            ),
            key_name: Value::Value("my-key".to_owned()),
            security_groups: to_string_list(["sg-123456"]),
            user_data: Value::Value("#!/bin/bash\necho hello".to_owned()),
            enable_monitoring: Value::Value(false),
            ebs_optimized: Value::Value(true),
            placement_tenancy: Value::Value("default".to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn create_request() {
        let mut diags = Diagnostics::default();
        let group = fields().expand_create(&mut diags, &state()).unwrap();
        assert_eq!(
            serde_json::to_value(&group).unwrap(),
            json!({"compute": {"launchSpecification": {
                "imageId": "ami-79826301",
                "keyPair": "my-key",
                "securityGroupIds": ["sg-123456"],
                "userData": "IyEvYmluL2Jhc2gKZWNobyBoZWxsbw==",
                "iamRole": {"arn": "arn:aws:iam::123456789012:instance-profile/web"},
                "monitoring": false,
                "ebsOptimized": true,
                "tenancy": "default"
            }}})
        );
    }

    #[test]
    fn create_skips_empty_strings() {
        let mut diags = Diagnostics::default();
        let state = GroupState {
            image_id: Value::Value(String::new()),
            iam_instance_profile: Value::Value(String::new()),
            key_name: Value::Value(String::new()),
            user_data: Value::Value(String::new()),
            placement_tenancy: Value::Value(String::new()),
            security_groups: to_string_list(["sg-1"]),
            ..Default::default()
        };
        let group = fields().expand_create(&mut diags, &state).unwrap();
        assert_eq!(
            serde_json::to_value(&group).unwrap(),
            json!({"compute": {"launchSpecification": {"securityGroupIds": ["sg-1"]}}})
        );

        let mut read = state.clone();
        fields().read(&mut diags, &group, &mut read).unwrap();
        let empty = Value::Value(String::new());
        assert_eq!(read.image_id, empty);
        assert_eq!(read.iam_instance_profile, empty);
        assert_eq!(read.key_name, empty);
        assert_eq!(read.user_data, empty);
        assert_eq!(read.placement_tenancy, empty);
    }

    #[test]
    fn update_clears_profile_user_data_and_tenancy() {
        let mut diags = Diagnostics::default();
        let state = GroupState {
            iam_instance_profile: Value::Value(String::new()),
            security_groups: to_string_list(["sg-1"]),
            ..Default::default()
        };
        let group = fields().expand_update(&mut diags, &state).unwrap();
        assert_eq!(
            serde_json::to_value(&group).unwrap(),
            json!({"compute": {"launchSpecification": {
                "securityGroupIds": ["sg-1"],
                "userData": null,
                "iamRole": null,
                "tenancy": null
            }}})
        );
    }

    #[test]
    fn profile_name() {
        assert_eq!(
            instance_profile("web-profile"),
            IamInstanceProfile {
                arn: None,
                name: Some("web-profile".to_owned()),
            }
        );
    }

    #[test]
    fn read_keeps_user_data_verbatim() {
        let mut diags = Diagnostics::default();
        let fields = fields();
        let group = fields.expand_create(&mut diags, &state()).unwrap();

        let mut read = state();
        fields.read(&mut diags, &group, &mut read).unwrap();
        assert_eq!(read, state());

        // user data given already encoded stays encoded
        let mut encoded = state();
        encoded.user_data = Value::Value("IyEvYmluL2Jhc2gKZWNobyBoZWxsbw==".to_owned());
        fields.read(&mut diags, &group, &mut encoded).unwrap();
        assert_eq!(
            encoded.user_data,
            Value::Value("IyEvYmluL2Jhc2gKZWNobyBoZWxsbw==".to_owned())
        );

        // imported resources get the decoded user data
        let mut imported = GroupState::default();
        fields.read(&mut diags, &group, &mut imported).unwrap();
        assert_eq!(
            imported.user_data,
            Value::Value("#!/bin/bash\necho hello".to_owned())
        );
        assert_eq!(
            imported.iam_instance_profile,
            Value::Value("arn:aws:iam::123456789012:instance-profile/web".to_owned())
        );
        assert!(diags.errors.is_empty());
    }
}
