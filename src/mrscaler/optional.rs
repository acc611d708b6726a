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

//! Tags and optional compute settings of the cluster

use anyhow::Result;
use tf_provider::schema::{AttributeType, NestedBlock};
use tf_provider::value::{Value, ValueList};

use crate::client::common::Tag;
use crate::client::mrscaler::{Application, FileWrapper, S3File, Scaler};
use crate::elastigroup::TagState;
use crate::fields::{nested, optional, required, string_list, Fields};
use crate::utils::{non_empty_owned, optional_string, string_list as collect_strings, to_string_list};

use super::state::{ApplicationState, S3FileState, ScalerState};

pub fn fields() -> Fields<ScalerState, Scaler> {
    let mut fields = Fields::<ScalerState, Scaler>::new("mrscaler");
    fields
        .block(
            "tags",
            NestedBlock::List(nested(
                "Tags of the cluster instances",
                vec![
                    ("key", required(AttributeType::String, "Tag key")),
                    ("value", optional(AttributeType::String, "Tag value")),
                ],
            )),
            |scaler, state| {
                let tags = scaler
                    .compute()
                    .and_then(|c| c.tags.as_ref())
                    .filter(|tags| !tags.is_empty());
                state.tags = match tags {
                    Some(tags) => Value::Value(
                        tags.iter()
                            .map(|tag| {
                                Value::Value(TagState {
                                    key: optional_string(tag.tag_key.clone()),
                                    value: optional_string(tag.tag_value.clone()),
                                })
                            })
                            .collect(),
                    ),
                    None => Value::Null,
                };
                Ok(())
            },
            |state, scaler| {
                if let Some(tags) = state.tags.as_ref_option() {
                    scaler.compute_mut().tags = Some(
                        tags.iter()
                            .flatten()
                            .map(|tag| Tag {
                                tag_key: tag.key.as_ref_option().cloned(),
                                tag_value: tag.value.as_ref_option().cloned(),
                            })
                            .collect(),
                    );
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "custom_ami_id",
            optional(AttributeType::String, "ID of a custom AMI for the cluster instances"),
            |scaler, state| {
                state.custom_ami_id =
                    optional_string(scaler.compute().and_then(|c| c.custom_ami_id.clone()));
                Ok(())
            },
            |state, scaler| {
                if let Some(ami) = non_empty_owned(&state.custom_ami_id) {
                    scaler.compute_mut().custom_ami_id = Some(ami);
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "repo_upgrade_on_boot",
            optional(
                AttributeType::String,
                "Applies Amazon Linux updates on boot: SECURITY or NONE",
            ),
            |scaler, state| {
                state.repo_upgrade_on_boot = optional_string(
                    scaler.compute().and_then(|c| c.repo_upgrade_on_boot.clone()),
                );
                Ok(())
            },
            |state, scaler| {
                if let Some(upgrade) = non_empty_owned(&state.repo_upgrade_on_boot) {
                    scaler.compute_mut().repo_upgrade_on_boot = Some(upgrade);
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "ec2_key_name",
            optional(AttributeType::String, "Name of the key pair of the instances"),
            |scaler, state| {
                state.ec2_key_name =
                    optional_string(scaler.compute().and_then(|c| c.ec2_key_name.clone()));
                Ok(())
            },
            |state, scaler| {
                if let Some(key_name) = non_empty_owned(&state.ec2_key_name) {
                    scaler.compute_mut().ec2_key_name = Some(key_name);
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "ebs_root_volume_size",
            optional(AttributeType::Number, "Size of the root volume in GiB"),
            |scaler, state| {
                state.ebs_root_volume_size =
                    scaler.compute().and_then(|c| c.ebs_root_volume_size).into();
                Ok(())
            },
            |state, scaler| {
                if let Some(size) = state.ebs_root_volume_size.as_ref_option() {
                    scaler.compute_mut().ebs_root_volume_size = Some(*size);
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "managed_primary_security_group",
            optional(
                AttributeType::String,
                "EMR managed security group of the master node",
            ),
            |scaler, state| {
                state.managed_primary_security_group = optional_string(
                    scaler
                        .compute()
                        .and_then(|c| c.managed_primary_security_group.clone()),
                );
                Ok(())
            },
            |state, scaler| {
                if let Some(group) = non_empty_owned(&state.managed_primary_security_group) {
                    scaler.compute_mut().managed_primary_security_group = Some(group);
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "managed_replica_security_group",
            optional(
                AttributeType::String,
                "EMR managed security group of the core and task nodes",
            ),
            |scaler, state| {
                state.managed_replica_security_group = optional_string(
                    scaler
                        .compute()
                        .and_then(|c| c.managed_replica_security_group.clone()),
                );
                Ok(())
            },
            |state, scaler| {
                if let Some(group) = non_empty_owned(&state.managed_replica_security_group) {
                    scaler.compute_mut().managed_replica_security_group = Some(group);
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "service_access_security_group",
            optional(
                AttributeType::String,
                "Security group used by the EMR service to access the cluster",
            ),
            |scaler, state| {
                state.service_access_security_group = optional_string(
                    scaler
                        .compute()
                        .and_then(|c| c.service_access_security_group.clone()),
                );
                Ok(())
            },
            |state, scaler| {
                if let Some(group) = non_empty_owned(&state.service_access_security_group) {
                    scaler.compute_mut().service_access_security_group = Some(group);
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "additional_primary_security_groups",
            optional(string_list(), "Additional security groups of the master node"),
            |scaler, state| {
                state.additional_primary_security_groups = read_strings(
                    scaler
                        .compute()
                        .and_then(|c| c.additional_primary_security_groups.clone()),
                );
                Ok(())
            },
            |state, scaler| {
                if let Some(groups) = collect_strings(&state.additional_primary_security_groups) {
                    scaler.compute_mut().additional_primary_security_groups = Some(groups);
                }
                Ok(())
            },
            None,
        )
        .attribute(
            "additional_replica_security_groups",
            optional(
                string_list(),
                "Additional security groups of the core and task nodes",
            ),
            |scaler, state| {
                state.additional_replica_security_groups = read_strings(
                    scaler
                        .compute()
                        .and_then(|c| c.additional_replica_security_groups.clone()),
                );
                Ok(())
            },
            |state, scaler| {
                if let Some(groups) = collect_strings(&state.additional_replica_security_groups) {
                    scaler.compute_mut().additional_replica_security_groups = Some(groups);
                }
                Ok(())
            },
            None,
        )
        .block(
            "applications",
            NestedBlock::List(nested(
                "Applications installed on the cluster",
                vec![
                    ("name", required(AttributeType::String, "Application name")),
                    ("version", optional(AttributeType::String, "Application version")),
                    ("args", optional(string_list(), "Application arguments")),
                ],
            )),
            |scaler, state| {
                let applications = scaler
                    .compute()
                    .and_then(|c| c.applications.as_ref())
                    .filter(|applications| !applications.is_empty());
                state.applications = match applications {
                    Some(applications) => Value::Value(
                        applications
                            .iter()
                            .map(|application| {
                                Value::Value(ApplicationState {
                                    name: optional_string(application.name.clone()),
                                    version: optional_string(application.version.clone()),
                                    args: read_strings(application.args.clone()),
                                })
                            })
                            .collect(),
                    ),
                    None => Value::Null,
                };
                Ok(())
            },
            |state, scaler| {
                if let Some(applications) = state.applications.as_ref_option() {
                    scaler.compute_mut().applications = Some(
                        applications
                            .iter()
                            .flatten()
                            .map(|application| Application {
                                name: non_empty_owned(&application.name),
                                version: non_empty_owned(&application.version),
                                args: collect_strings(&application.args),
                            })
                            .collect(),
                    );
                }
                Ok(())
            },
            None,
        )
        .block(
            "steps_file",
            s3_file_block("S3 file describing the steps of the cluster"),
            |scaler, state| {
                state.steps_file = read_file(scaler.compute().and_then(|c| c.steps.as_ref()));
                Ok(())
            },
            |state, scaler| {
                if let Some(file) = write_file(&state.steps_file) {
                    scaler.compute_mut().steps = Some(file);
                }
                Ok(())
            },
            None,
        )
        .block(
            "configurations_file",
            s3_file_block("S3 file holding the configurations of the cluster applications"),
            |scaler, state| {
                state.configurations_file =
                    read_file(scaler.compute().and_then(|c| c.configurations.as_ref()));
                Ok(())
            },
            |state, scaler| {
                if let Some(file) = write_file(&state.configurations_file) {
                    scaler.compute_mut().configurations = Some(file);
                }
                Ok(())
            },
            None,
        )
        .block(
            "bootstrap_actions_file",
            s3_file_block("S3 file describing the bootstrap actions of the cluster"),
            |scaler, state| {
                state.bootstrap_actions_file =
                    read_file(scaler.compute().and_then(|c| c.bootstrap_actions.as_ref()));
                Ok(())
            },
            write_bootstrap_actions,
            None,
        );
    fields
}

fn s3_file_block(description: &str) -> NestedBlock {
    NestedBlock::List(nested(
        description,
        vec![
            ("bucket", required(AttributeType::String, "S3 bucket")),
            ("key", required(AttributeType::String, "S3 key")),
        ],
    ))
}

fn read_strings(strings: Option<Vec<String>>) -> ValueList<Value<String>> {
    match strings {
        Some(strings) if !strings.is_empty() => to_string_list(strings),
        _ => Value::Null,
    }
}

fn read_file(wrapper: Option<&FileWrapper>) -> ValueList<Value<S3FileState>> {
    match wrapper.and_then(|wrapper| wrapper.file.as_ref()) {
        Some(file) => Value::Value(vec![Value::Value(S3FileState {
            bucket: optional_string(file.bucket.clone()),
            key: optional_string(file.key.clone()),
        })]),
        None => Value::Null,
    }
}

/// The API accepts a single file: only the first block is sent
fn write_file(files: &ValueList<Value<S3FileState>>) -> Option<FileWrapper> {
    let file = files.as_ref_option()?.iter().flatten().next()?;
    Some(FileWrapper {
        file: Some(S3File {
            bucket: non_empty_owned(&file.bucket),
            key: non_empty_owned(&file.key),
        }),
    })
}

fn write_bootstrap_actions(state: &ScalerState, scaler: &mut Scaler) -> Result<()> {
    if let Some(file) = write_file(&state.bootstrap_actions_file) {
        scaler.compute_mut().bootstrap_actions = Some(file);
    }
    Ok(())
}
