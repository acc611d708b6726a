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

use std::sync::OnceLock;

use base64::{engine::general_purpose::STANDARD, Engine};
use regex::Regex;
use tf_provider::value::{Value, ValueList};

/// Matches an IAM instance profile given by ARN rather than by name
pub(crate) fn instance_profile_arn_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"arn:aws:iam::\d{12}:instance-profile/?[a-zA-Z_0-9+=,.@\-_/]+")
            .expect("instance profile regex is valid")
    })
}

/// Encode `data` in standard base64, unless it is already encoded
pub(crate) fn base64_encode(data: &str) -> String {
    if is_base64_encoded(data) {
        data.to_owned()
    } else {
        STANDARD.encode(data)
    }
}

pub(crate) fn is_base64_encoded(data: &str) -> bool {
    STANDARD.decode(data).is_ok()
}

/// Decode a base64 payload, falling back to the raw payload when it is not valid base64
/// or does not decode to UTF-8
pub(crate) fn base64_decode(data: &str) -> String {
    STANDARD
        .decode(data)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| data.to_owned())
}

/// Known and non-empty string
pub(crate) fn non_empty(value: &Value<String>) -> Option<&str> {
    value.as_deref_option().filter(|s| !s.is_empty())
}

pub(crate) fn non_empty_owned(value: &Value<String>) -> Option<String> {
    non_empty(value).map(ToOwned::to_owned)
}

/// Collect the known elements of a list of strings
pub(crate) fn string_list(value: &ValueList<Value<String>>) -> Option<Vec<String>> {
    value.as_ref_option().map(|list| {
        list.iter()
            .filter_map(|item| item.as_ref_option().cloned())
            .collect()
    })
}

pub(crate) fn to_string_list<I, S>(items: I) -> ValueList<Value<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Value::Value(items.into_iter().map(|s| Value::Value(s.into())).collect())
}

pub(crate) fn optional_string<S: Into<String>>(value: Option<S>) -> Value<String> {
    value.map(Into::into).into()
}

/// Remote value of an optional string, keeping an empty string the API does not store
pub(crate) fn read_string(current: &Value<String>, remote: Option<String>) -> Value<String> {
    match remote.filter(|remote| !remote.is_empty()) {
        Some(remote) => Value::Value(remote),
        None if current.as_deref_option() == Some("") => Value::Value(String::new()),
        None => Value::Null,
    }
}

/// Split an `availability_zone[:subnet]` pair
pub(crate) fn split_zone(zone: &str) -> (String, Option<String>) {
    match zone.split_once(':') {
        Some((name, subnet)) if !subnet.is_empty() => (name.to_owned(), Some(subnet.to_owned())),
        Some((name, _)) => (name.to_owned(), None),
        None => (zone.to_owned(), None),
    }
}

pub(crate) fn join_zone(name: &str, subnet: Option<&str>) -> String {
    match subnet {
        Some(subnet) if !subnet.is_empty() => format!("{name}:{subnet}"),
        _ => name.to_owned(),
    }
}

/// Replace an unknown value with the remote one, or with null if the remote value is also unknown
pub(crate) fn resolve<T: Clone>(planned: &mut Value<T>, remote: &Value<T>) {
    if planned.is_unknown() {
        *planned = if remote.is_unknown() {
            Value::Null
        } else {
            remote.clone()
        };
    }
}

pub(crate) fn unknown_if_null<T>(value: &mut Value<T>) {
    if value.is_null() {
        *value = Value::Unknown;
    }
}

pub(crate) fn default_if_null<T>(value: &mut Value<T>, default: impl FnOnce() -> T) {
    if value.is_null() {
        *value = Value::Value(default());
    }
}
