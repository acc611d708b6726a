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

//! Master, core and task instance groups of the cluster
//!
//! Only the capacities of the core and task groups can be changed in place.

use anyhow::Result;
use tf_provider::schema::{AttributeType, Block, NestedBlock};
use tf_provider::value::{Value, ValueBool, ValueList};

use crate::client::mrscaler::{
    EbsBlockDeviceConfig, EbsConfiguration, InstanceGroup, InstanceGroupCapacity, Scaler,
    VolumeSpecification,
};
use crate::fields::{nested, optional, required, string_list, Fields};
use crate::utils::{non_empty_owned, optional_string, string_list as collect_strings, to_string_list};

use super::state::{EbsBlockDeviceState, ScalerState};

pub const LIFECYCLES: [&str; 2] = ["SPOT", "ON_DEMAND"];

/// Instance types, lifecycle and EBS settings of one instance group
macro_rules! instance_group_fields {
    ($fields:ident, $group:literal, $types:ident, $lifecycle:ident, $ebs_optimized:ident, $ebs_block_device:ident, $get:ident, $get_mut:ident) => {
        $fields
            .attribute(
                stringify!($types),
                required(string_list(), concat!("Instance types of the ", $group, " group")),
                |scaler, state| {
                    state.$types = read_instance_types($get(scaler));
                    Ok(())
                },
                |state, scaler| {
                    if let Some(types) = collect_strings(&state.$types) {
                        $get_mut(scaler).instance_types = Some(types);
                    }
                    Ok(())
                },
                None,
            )
            .attribute(
                stringify!($lifecycle),
                required(
                    AttributeType::String,
                    concat!("Lifecycle of the ", $group, " instances: SPOT or ON_DEMAND"),
                ),
                |scaler, state| {
                    state.$lifecycle = optional_string($get(scaler).and_then(|g| g.life_cycle.clone()));
                    Ok(())
                },
                |state, scaler| {
                    if let Some(lifecycle) = non_empty_owned(&state.$lifecycle) {
                        $get_mut(scaler).life_cycle = Some(lifecycle);
                    }
                    Ok(())
                },
                None,
            )
            .attribute(
                stringify!($ebs_optimized),
                optional(
                    AttributeType::Bool,
                    concat!("Launch EBS optimized ", $group, " instances"),
                ),
                |scaler, state| {
                    state.$ebs_optimized = read_ebs_optimized($get(scaler));
                    Ok(())
                },
                |state, scaler| {
                    if let Some(ebs_optimized) = state.$ebs_optimized.as_ref_option() {
                        ebs_configuration($get_mut(scaler)).ebs_optimized = Some(*ebs_optimized);
                    }
                    Ok(())
                },
                None,
            )
            .block(
                stringify!($ebs_block_device),
                NestedBlock::List(ebs_block_device_schema($group)),
                |scaler, state| {
                    state.$ebs_block_device = read_ebs_block_devices($get(scaler));
                    Ok(())
                },
                |state, scaler| {
                    if let Some(devices) = write_ebs_block_devices(&state.$ebs_block_device) {
                        ebs_configuration($get_mut(scaler)).ebs_block_device_configs = Some(devices);
                    }
                    Ok(())
                },
                None,
            )
    };
}

pub fn fields() -> Fields<ScalerState, Scaler> {
    let mut fields = Fields::<ScalerState, Scaler>::new("mrscaler");

    instance_group_fields!(
        fields,
        "master",
        master_instance_types,
        master_lifecycle,
        master_ebs_optimized,
        master_ebs_block_device,
        master,
        master_mut
    )
    .attribute(
        "master_target",
        optional(AttributeType::Number, "Number of master instances"),
        |scaler, state| {
            state.master_target = master(scaler).and_then(|g| g.target).into();
            Ok(())
        },
        |state, scaler| {
            if let Some(target) = state.master_target.as_ref_option() {
                master_mut(scaler).target = Some(*target);
            }
            Ok(())
        },
        None,
    );

    instance_group_fields!(
        fields,
        "core",
        core_instance_types,
        core_lifecycle,
        core_ebs_optimized,
        core_ebs_block_device,
        core,
        core_mut
    )
    .attribute(
        "core_min_size",
        optional(AttributeType::Number, "Minimal number of core instances"),
        |scaler, state| {
            state.core_min_size = capacity(core(scaler)).and_then(|c| c.minimum).into();
            Ok(())
        },
        write_core_min_size,
        Some(write_core_min_size),
    )
    .attribute(
        "core_max_size",
        optional(AttributeType::Number, "Maximal number of core instances"),
        |scaler, state| {
            state.core_max_size = capacity(core(scaler)).and_then(|c| c.maximum).into();
            Ok(())
        },
        write_core_max_size,
        Some(write_core_max_size),
    )
    .attribute(
        "core_desired_capacity",
        optional(AttributeType::Number, "Desired number of core instances"),
        |scaler, state| {
            state.core_desired_capacity = capacity(core(scaler)).and_then(|c| c.target).into();
            Ok(())
        },
        write_core_desired_capacity,
        Some(write_core_desired_capacity),
    );

    instance_group_fields!(
        fields,
        "task",
        task_instance_types,
        task_lifecycle,
        task_ebs_optimized,
        task_ebs_block_device,
        task,
        task_mut
    )
    .attribute(
        "task_min_size",
        optional(AttributeType::Number, "Minimal number of task instances"),
        |scaler, state| {
            state.task_min_size = capacity(task(scaler)).and_then(|c| c.minimum).into();
            Ok(())
        },
        write_task_min_size,
        Some(write_task_min_size),
    )
    .attribute(
        "task_max_size",
        optional(AttributeType::Number, "Maximal number of task instances"),
        |scaler, state| {
            state.task_max_size = capacity(task(scaler)).and_then(|c| c.maximum).into();
            Ok(())
        },
        write_task_max_size,
        Some(write_task_max_size),
    )
    .attribute(
        "task_desired_capacity",
        optional(AttributeType::Number, "Desired number of task instances"),
        |scaler, state| {
            state.task_desired_capacity = capacity(task(scaler)).and_then(|c| c.target).into();
            Ok(())
        },
        write_task_desired_capacity,
        Some(write_task_desired_capacity),
    );

    fields
}

fn master(scaler: &Scaler) -> Option<&InstanceGroup> {
    scaler.instance_groups()?.master_group.as_ref()
}

fn core(scaler: &Scaler) -> Option<&InstanceGroup> {
    scaler.instance_groups()?.core_group.as_ref()
}

fn task(scaler: &Scaler) -> Option<&InstanceGroup> {
    scaler.instance_groups()?.task_group.as_ref()
}

fn master_mut(scaler: &mut Scaler) -> &mut InstanceGroup {
    scaler
        .instance_groups_mut()
        .master_group
        .get_or_insert_with(Default::default)
}

fn core_mut(scaler: &mut Scaler) -> &mut InstanceGroup {
    scaler
        .instance_groups_mut()
        .core_group
        .get_or_insert_with(Default::default)
}

fn task_mut(scaler: &mut Scaler) -> &mut InstanceGroup {
    scaler
        .instance_groups_mut()
        .task_group
        .get_or_insert_with(Default::default)
}

fn capacity(group: Option<&InstanceGroup>) -> Option<&InstanceGroupCapacity> {
    group?.capacity.as_ref()
}

fn capacity_mut(group: &mut InstanceGroup) -> &mut InstanceGroupCapacity {
    group.capacity.get_or_insert_with(Default::default)
}

fn ebs_configuration(group: &mut InstanceGroup) -> &mut EbsConfiguration {
    group.ebs_configuration.get_or_insert_with(Default::default)
}

fn ebs_block_device_schema(group: &str) -> Block {
    nested(
        &format!("EBS volumes attached to the {group} instances"),
        vec![
            (
                "volumes_per_instance",
                optional(AttributeType::Number, "Number of volumes per instance"),
            ),
            (
                "volume_type",
                required(AttributeType::String, "Volume type: gp2, io1 or standard"),
            ),
            (
                "size_in_gb",
                required(AttributeType::Number, "Size of each volume in GiB"),
            ),
            (
                "iops",
                optional(AttributeType::Number, "Provisioned IOPS (io1 volumes)"),
            ),
        ],
    )
}

fn read_instance_types(group: Option<&InstanceGroup>) -> ValueList<Value<String>> {
    match group.and_then(|g| g.instance_types.clone()) {
        Some(types) if !types.is_empty() => to_string_list(types),
        _ => Value::Null,
    }
}

fn read_ebs_optimized(group: Option<&InstanceGroup>) -> ValueBool {
    group
        .and_then(|g| g.ebs_configuration.as_ref())
        .and_then(|ebs| ebs.ebs_optimized)
        .into()
}

fn read_ebs_block_devices(group: Option<&InstanceGroup>) -> ValueList<Value<EbsBlockDeviceState>> {
    let devices = group
        .and_then(|g| g.ebs_configuration.as_ref())
        .and_then(|ebs| ebs.ebs_block_device_configs.as_ref())
        .filter(|devices| !devices.is_empty());
    let Some(devices) = devices else {
        return Value::Null;
    };
    Value::Value(
        devices
            .iter()
            .map(|device| {
                let volume = device.volume_specification.clone().unwrap_or_default();
                Value::Value(EbsBlockDeviceState {
                    volumes_per_instance: device.volumes_per_instance.into(),
                    volume_type: optional_string(volume.volume_type),
                    size_in_gb: volume.size_in_gb.into(),
                    iops: volume.iops.into(),
                })
            })
            .collect(),
    )
}

fn write_ebs_block_devices(
    devices: &ValueList<Value<EbsBlockDeviceState>>,
) -> Option<Vec<EbsBlockDeviceConfig>> {
    let devices = devices.as_ref_option()?;
    Some(
        devices
            .iter()
            .flatten()
            .map(|device| EbsBlockDeviceConfig {
                volumes_per_instance: device.volumes_per_instance.as_ref_option().copied(),
                volume_specification: Some(VolumeSpecification {
                    volume_type: non_empty_owned(&device.volume_type),
                    size_in_gb: device.size_in_gb.as_ref_option().copied(),
                    iops: device.iops.as_ref_option().copied(),
                }),
            })
            .collect(),
    )
}

fn write_core_min_size(state: &ScalerState, scaler: &mut Scaler) -> Result<()> {
    if let Some(minimum) = state.core_min_size.as_ref_option() {
        capacity_mut(core_mut(scaler)).minimum = Some(*minimum);
    }
    Ok(())
}

fn write_core_max_size(state: &ScalerState, scaler: &mut Scaler) -> Result<()> {
    if let Some(maximum) = state.core_max_size.as_ref_option() {
        capacity_mut(core_mut(scaler)).maximum = Some(*maximum);
    }
    Ok(())
}

fn write_core_desired_capacity(state: &ScalerState, scaler: &mut Scaler) -> Result<()> {
    if let Some(target) = state.core_desired_capacity.as_ref_option() {
        capacity_mut(core_mut(scaler)).target = Some(*target);
    }
    Ok(())
}

fn write_task_min_size(state: &ScalerState, scaler: &mut Scaler) -> Result<()> {
    if let Some(minimum) = state.task_min_size.as_ref_option() {
        capacity_mut(task_mut(scaler)).minimum = Some(*minimum);
    }
    Ok(())
}

fn write_task_max_size(state: &ScalerState, scaler: &mut Scaler) -> Result<()> {
    if let Some(maximum) = state.task_max_size.as_ref_option() {
        capacity_mut(task_mut(scaler)).maximum = Some(*maximum);
    }
    Ok(())
}

fn write_task_desired_capacity(state: &ScalerState, scaler: &mut Scaler) -> Result<()> {
    if let Some(target) = state.task_desired_capacity.as_ref_option() {
        capacity_mut(task_mut(scaler)).target = Some(*target);
    }
    Ok(())
}
