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

//! Scaling policies and scheduled tasks, both updatable in place

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use tf_provider::schema::{AttributeType, Block, NestedBlock};
use tf_provider::value::{Value, ValueList};

use crate::client::mrscaler::{
    Dimension, Scaler, Scaling, ScalingAction, ScalingPolicy, ScheduledTask, Scheduling,
};
use crate::fields::{nested, optional, required, Fields};
use crate::utils::{non_empty_owned, optional_string};

use super::state::{ScalerState, ScalingPolicyState, ScheduledTaskState};

pub const ACTION_TYPES: [&str; 6] = [
    "adjustment",
    "percentageAdjustment",
    "setMaxTarget",
    "setMinTarget",
    "updateCapacity",
    "updateTarget",
];

/// Scaling policies of the task and core groups
macro_rules! scaling_policy_field {
    ($fields:ident, $name:ident, $description:literal, $scaling:ident, $scaling_mut:ident, $direction:ident) => {
        $fields.block(
            stringify!($name),
            NestedBlock::List(policy_schema($description)),
            |scaler, state| {
                state.$name = read_policies(
                    scaler
                        .$scaling
                        .as_ref()
                        .and_then(|scaling| scaling.$direction.as_ref()),
                );
                Ok(())
            },
            |state, scaler| {
                if let Some(policies) = write_policies(&state.$name)? {
                    $scaling_mut(scaler).$direction = Some(policies);
                }
                Ok(())
            },
            Some(|state, scaler| {
                // an empty list removes the policies
                $scaling_mut(scaler).$direction = Some(write_policies(&state.$name)?.unwrap_or_default());
                Ok(())
            }),
        )
    };
}

pub fn fields() -> Fields<ScalerState, Scaler> {
    let mut fields = Fields::<ScalerState, Scaler>::new("mrscaler");
    scaling_policy_field!(
        fields,
        task_scaling_up_policy,
        "Scale up policies of the task group",
        scaling,
        task_scaling,
        up
    );
    scaling_policy_field!(
        fields,
        task_scaling_down_policy,
        "Scale down policies of the task group",
        scaling,
        task_scaling,
        down
    );
    scaling_policy_field!(
        fields,
        core_scaling_up_policy,
        "Scale up policies of the core group",
        core_scaling,
        core_scaling,
        up
    );
    scaling_policy_field!(
        fields,
        core_scaling_down_policy,
        "Scale down policies of the core group",
        core_scaling,
        core_scaling,
        down
    );

    fields.block(
        "scheduled_task",
        NestedBlock::List(nested(
            "Scheduled changes of the instance groups",
            vec![
                (
                    "is_enabled",
                    optional(AttributeType::Bool, "Enable the task (default: true)"),
                ),
                (
                    "task_type",
                    required(
                        AttributeType::String,
                        "Type of the task: setCapacity",
                    ),
                ),
                (
                    "instance_group_type",
                    required(AttributeType::String, "Instance group of the task: task or core"),
                ),
                (
                    "cron",
                    required(AttributeType::String, "Cron expression of the task"),
                ),
                (
                    "desired_capacity",
                    optional(AttributeType::Number, "New desired capacity of the group"),
                ),
                (
                    "min_capacity",
                    optional(AttributeType::Number, "New minimal capacity of the group"),
                ),
                (
                    "max_capacity",
                    optional(AttributeType::Number, "New maximal capacity of the group"),
                ),
            ],
        )),
        |scaler, state| {
            let tasks = scaler
                .scheduling
                .as_ref()
                .and_then(|scheduling| scheduling.tasks.as_ref())
                .filter(|tasks| !tasks.is_empty());
            state.scheduled_task = match tasks {
                Some(tasks) => Value::Value(
                    tasks
                        .iter()
                        .map(|task| {
                            Value::Value(ScheduledTaskState {
                                is_enabled: task.is_enabled.into(),
                                task_type: optional_string(task.task_type.clone()),
                                instance_group_type: optional_string(
                                    task.instance_group_type.clone(),
                                ),
                                cron: optional_string(task.cron_expression.clone()),
                                desired_capacity: task.target_capacity.into(),
                                min_capacity: task.min_capacity.into(),
                                max_capacity: task.max_capacity.into(),
                            })
                        })
                        .collect(),
                ),
                None => Value::Null,
            };
            Ok(())
        },
        |state, scaler| {
            if let Some(tasks) = write_tasks(&state.scheduled_task) {
                scaler.scheduling = Some(Scheduling { tasks: Some(tasks) });
            }
            Ok(())
        },
        Some(|state, scaler| {
            scaler.scheduling = Some(Scheduling {
                tasks: Some(write_tasks(&state.scheduled_task).unwrap_or_default()),
            });
            Ok(())
        }),
    );
    fields
}

fn task_scaling(scaler: &mut Scaler) -> &mut Scaling {
    scaler.scaling.get_or_insert_with(Default::default)
}

fn core_scaling(scaler: &mut Scaler) -> &mut Scaling {
    scaler.core_scaling.get_or_insert_with(Default::default)
}

fn policy_schema(description: &str) -> Block {
    nested(
        description,
        vec![
            ("policy_name", required(AttributeType::String, "Name of the policy")),
            (
                "metric_name",
                required(AttributeType::String, "CloudWatch metric watched by the policy"),
            ),
            (
                "namespace",
                required(AttributeType::String, "CloudWatch namespace of the metric"),
            ),
            (
                "statistic",
                optional(
                    AttributeType::String,
                    "Statistic of the metric: average, sum, sampleCount, maximum or minimum",
                ),
            ),
            ("unit", required(AttributeType::String, "Unit of the metric")),
            (
                "threshold",
                required(AttributeType::Number, "Value triggering the policy"),
            ),
            (
                "period",
                optional(AttributeType::Number, "Evaluation period in seconds"),
            ),
            (
                "evaluation_periods",
                optional(
                    AttributeType::Number,
                    "Number of periods over which the metric is compared to the threshold",
                ),
            ),
            (
                "cooldown",
                optional(
                    AttributeType::Number,
                    "Seconds to wait after a scaling action before another one",
                ),
            ),
            (
                "operator",
                optional(AttributeType::String, "Comparison operator: gte or lte"),
            ),
            (
                "dimensions",
                optional(
                    AttributeType::Map(Box::new(AttributeType::String)),
                    "Dimensions of the metric, by name",
                ),
            ),
            (
                "action_type",
                optional(AttributeType::String, "Type of scaling action"),
            ),
            (
                "adjustment",
                optional(AttributeType::String, "Number of instances to add or remove"),
            ),
            (
                "min_target_capacity",
                optional(AttributeType::String, "New minimal target capacity"),
            ),
            (
                "max_target_capacity",
                optional(AttributeType::String, "New maximal target capacity"),
            ),
            ("target", optional(AttributeType::String, "New target capacity")),
            ("minimum", optional(AttributeType::String, "New minimal capacity")),
            ("maximum", optional(AttributeType::String, "New maximal capacity")),
        ],
    )
}

fn read_policies(policies: Option<&Vec<ScalingPolicy>>) -> ValueList<Value<ScalingPolicyState>> {
    let Some(policies) = policies.filter(|policies| !policies.is_empty()) else {
        return Value::Null;
    };
    Value::Value(
        policies
            .iter()
            .map(|policy| {
                let action = policy.action.clone().unwrap_or_default();
                let dimensions = policy
                    .dimensions
                    .as_ref()
                    .filter(|dimensions| !dimensions.is_empty())
                    .map(|dimensions| {
                        dimensions
                            .iter()
                            .filter_map(|dimension| {
                                Some((
                                    dimension.name.clone()?,
                                    optional_string(dimension.value.clone()),
                                ))
                            })
                            .collect::<BTreeMap<_, _>>()
                    });
                Value::Value(ScalingPolicyState {
                    policy_name: optional_string(policy.policy_name.clone()),
                    metric_name: optional_string(policy.metric_name.clone()),
                    namespace: optional_string(policy.namespace.clone()),
                    statistic: optional_string(policy.statistic.clone()),
                    unit: optional_string(policy.unit.clone()),
                    threshold: policy.threshold.into(),
                    period: policy.period.into(),
                    evaluation_periods: policy.evaluation_periods.into(),
                    cooldown: policy.cooldown.into(),
                    operator: optional_string(policy.operator.clone()),
                    dimensions: dimensions.into(),
                    action_type: optional_string(action.action_type),
                    adjustment: optional_string(action.adjustment),
                    min_target_capacity: optional_string(action.min_target_capacity),
                    max_target_capacity: optional_string(action.max_target_capacity),
                    target: optional_string(action.target),
                    minimum: optional_string(action.minimum),
                    maximum: optional_string(action.maximum),
                })
            })
            .collect(),
    )
}

fn write_policies(
    policies: &ValueList<Value<ScalingPolicyState>>,
) -> Result<Option<Vec<ScalingPolicy>>> {
    let Some(policies) = policies.as_ref_option() else {
        return Ok(None);
    };
    policies
        .iter()
        .flatten()
        .map(write_policy)
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

fn write_policy(policy: &ScalingPolicyState) -> Result<ScalingPolicy> {
    let action_type = non_empty_owned(&policy.action_type);
    if let Some(action_type) = &action_type {
        if !ACTION_TYPES.contains(&action_type.as_str()) {
            bail!(
                "invalid action type `{action_type}` in policy {}, expected one of: {}",
                policy.policy_name.as_deref_option().unwrap_or_default(),
                ACTION_TYPES.join(", ")
            );
        }
    }

    let dimensions = policy.dimensions.as_ref_option().map(|dimensions| {
        dimensions
            .iter()
            .map(|(name, value)| Dimension {
                name: Some(name.clone()),
                value: value.as_ref_option().cloned(),
            })
            .collect()
    });

    Ok(ScalingPolicy {
        policy_name: non_empty_owned(&policy.policy_name),
        metric_name: non_empty_owned(&policy.metric_name),
        namespace: non_empty_owned(&policy.namespace),
        statistic: non_empty_owned(&policy.statistic),
        unit: non_empty_owned(&policy.unit),
        threshold: policy.threshold.as_ref_option().copied(),
        period: policy.period.as_ref_option().copied(),
        evaluation_periods: policy.evaluation_periods.as_ref_option().copied(),
        cooldown: policy.cooldown.as_ref_option().copied(),
        operator: non_empty_owned(&policy.operator),
        dimensions,
        action: Some(ScalingAction {
            action_type,
            adjustment: non_empty_owned(&policy.adjustment),
            min_target_capacity: non_empty_owned(&policy.min_target_capacity),
            max_target_capacity: non_empty_owned(&policy.max_target_capacity),
            target: non_empty_owned(&policy.target),
            minimum: non_empty_owned(&policy.minimum),
            maximum: non_empty_owned(&policy.maximum),
        }),
    })
}

fn write_tasks(tasks: &ValueList<Value<ScheduledTaskState>>) -> Option<Vec<ScheduledTask>> {
    let tasks = tasks.as_ref_option()?;
    Some(
        tasks
            .iter()
            .flatten()
            .map(|task| ScheduledTask {
                is_enabled: task.is_enabled.as_ref_option().copied(),
                instance_group_type: non_empty_owned(&task.instance_group_type),
                task_type: non_empty_owned(&task.task_type),
                cron_expression: non_empty_owned(&task.cron),
                target_capacity: task.desired_capacity.as_ref_option().copied(),
                min_capacity: task.min_capacity.as_ref_option().copied(),
                max_capacity: task.max_capacity.as_ref_option().copied(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tf_provider::Diagnostics;

    use super::*;

    fn policy(name: &str) -> ScalingPolicyState {
        ScalingPolicyState {
            policy_name: Value::Value(name.to_owned()),
            metric_name: Value::Value("CPUUtilization".to_owned()),
            namespace: Value::Value("AWS/EC2".to_owned()),
            statistic: Value::Value("average".to_owned()),
            unit: Value::Value("percent".to_owned()),
            threshold: Value::Value(80.0),
            period: Value::Value(300),
            evaluation_periods: Value::Value(1),
            cooldown: Value::Value(300),
            operator: Value::Value("gte".to_owned()),
            dimensions: Value::Value(BTreeMap::from([(
                "JobFlowId".to_owned(),
                Value::Value("j-1".to_owned()),
            )])),
            action_type: Value::Value("adjustment".to_owned()),
            adjustment: Value::Value("1".to_owned()),
            ..Default::default()
        }
    }

    fn state() -> ScalerState {
        ScalerState {
            task_scaling_up_policy: Value::Value(vec![Value::Value(policy("task-up"))]),
            core_scaling_down_policy: Value::Value(vec![Value::Value(policy("core-down"))]),
            scheduled_task: Value::Value(vec![Value::Value(ScheduledTaskState {
                is_enabled: Value::Value(true),
                task_type: Value::Value("setCapacity".to_owned()),
                instance_group_type: Value::Value("task".to_owned()),
                cron: Value::Value("0 8 * * *".to_owned()),
                desired_capacity: Value::Value(2),
                min_capacity: Value::Value(0),
                max_capacity: Value::Value(5),
            })]),
            ..Default::default()
        }
    }

    #[test]
    fn create_and_read() {
        let mut diags = Diagnostics::default();
        let fields = fields();
        let scaler = fields.expand_create(&mut diags, &state()).unwrap();
        let body = serde_json::to_value(&scaler).unwrap();
        assert_eq!(
            body["scaling"]["up"][0],
            json!({
                "policyName": "task-up",
                "metricName": "CPUUtilization",
                "namespace": "AWS/EC2",
                "statistic": "average",
                "unit": "percent",
                "threshold": 80.0,
                "period": 300,
                "evaluationPeriods": 1,
                "cooldown": 300,
                "operator": "gte",
                "dimensions": [{"name": "JobFlowId", "value": "j-1"}],
                "action": {"type": "adjustment", "adjustment": "1"}
            })
        );
        assert!(body["scaling"].get("down").is_none());
        assert_eq!(body["coreScaling"]["down"][0]["policyName"], "core-down");
        assert_eq!(
            body["scheduling"]["tasks"][0],
            json!({
                "isEnabled": true,
                "instanceGroupType": "task",
                "taskType": "setCapacity",
                "cronExpression": "0 8 * * *",
                "targetCapacity": 2,
                "minCapacity": 0,
                "maxCapacity": 5
            })
        );

        let mut read = ScalerState::default();
        fields.read(&mut diags, &scaler, &mut read).unwrap();
        assert_eq!(read, state());
    }

    #[test]
    fn update_clears_removed_policies() {
        let mut diags = Diagnostics::default();
        let scaler = fields().expand_update(&mut diags, &state()).unwrap();
        let body = serde_json::to_value(&scaler).unwrap();
        assert_eq!(body["scaling"]["down"], json!([]));
        assert_eq!(body["coreScaling"]["up"], json!([]));
        assert_eq!(body["scaling"]["up"][0]["policyName"], "task-up");
        assert!(fields().iter().all(|field| !field.force_new()));
    }

    #[test]
    fn invalid_action_type() {
        let mut diags = Diagnostics::default();
        let mut policy = policy("task-up");
        policy.action_type = Value::Value("explode".to_owned());
        let state = ScalerState {
            task_scaling_up_policy: Value::Value(vec![Value::Value(policy)]),
            ..Default::default()
        };
        assert!(fields().expand_create(&mut diags, &state).is_none());
        assert_eq!(
            diags.errors[0].summary,
            "mrscaler failed expanding field task_scaling_up_policy"
        );
        assert!(diags.errors[0].detail.contains("explode"));
    }
}
