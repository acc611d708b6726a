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

//! Terraform provider for Spotinst
//!
//! Maps `spotinst_aws_elastigroup` and `spotinst_mrscaler_aws` resource blocks onto the
//! Spotinst REST API. Each resource is described by a [`fields::Fields`] table: one entry
//! per attribute, holding its schema and the closures copying the value between the
//! Terraform state and the API objects.

pub mod client;
pub mod elastigroup;
pub mod fields;
pub mod launch_configuration;
pub mod mrscaler;
pub mod provider;
mod utils;

pub use provider::SpotinstProvider;
