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

use thiserror::Error;

use super::common::ErrorItem;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Spotinst API returned HTTP {status}: {message}")]
    Api {
        status: u16,
        message: String,
        errors: Vec<ErrorItem>,
    },

    #[error("{0} does not exist")]
    NotFound(String),

    #[error("Authentication failed, check the Spotinst token")]
    Unauthorized,

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    /// The requested object does not exist (anymore)
    ///
    /// Spotinst reports some missing objects with a 400 and an error code such as
    /// `GROUP_DOESNT_EXIST` instead of a 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            ApiError::NotFound(_) => true,
            ApiError::Api { errors, .. } => errors.iter().any(|err| {
                let code = err.code.to_ascii_uppercase();
                code.contains("DOESNT_EXIST") || code.contains("NOT_FOUND")
            }),
            _ => false,
        }
    }

    /// A timed out request may have reached the API, so it is only sent again when idempotent
    pub(crate) fn is_retryable(&self, idempotent: bool) -> bool {
        match self {
            ApiError::Request(err) => err.is_connect() || (idempotent && err.is_timeout()),
            ApiError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
