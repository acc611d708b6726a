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

//! `spotinst` provider block

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tf_provider::{map, Diagnostics, Provider};
use tf_provider::schema::{
    Attribute, AttributeConstraint, AttributeType, Block, Description, Schema,
};
use tf_provider::value::Value;
use tokio::sync::RwLock;

use crate::client::{Client, Credentials};
use crate::elastigroup::GroupResource;
use crate::mrscaler::ScalerResource;

pub const TOKEN_ENV: &str = "SPOTINST_TOKEN";
pub const ACCOUNT_ENV: &str = "SPOTINST_ACCOUNT";
pub const ENDPOINT_ENV: &str = "SPOTINST_ENDPOINT";

/// Client shared between the provider and its resources, set by `configure`
pub type SharedClient = Arc<RwLock<Option<Client>>>;

pub(crate) async fn configured_client(
    client: &SharedClient,
    diags: &mut Diagnostics,
) -> Option<Client> {
    let client = client.read().await.clone();
    if client.is_none() {
        diags.root_error(
            "Provider is not configured",
            "The spotinst provider must be configured before managing resources",
        );
    }
    client
}

#[derive(Debug, Default, Clone)]
pub struct SpotinstProvider {
    client: SharedClient,
}

impl SpotinstProvider {
    pub fn client(&self) -> SharedClient {
        self.client.clone()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub token: Value<String>,
    pub account: Value<String>,
    pub endpoint: Value<String>,
}

impl ProviderConfig {
    /// Resolve the credentials, falling back to the environment for missing attributes
    pub fn credentials(&self, env: impl Fn(&str) -> Option<String>) -> Option<Credentials> {
        let setting = |value: &Value<String>, name: &str| {
            value
                .as_deref_option()
                .filter(|value| !value.is_empty())
                .map(ToOwned::to_owned)
                .or_else(|| env(name).filter(|value| !value.is_empty()))
        };
        Some(Credentials {
            token: setting(&self.token, TOKEN_ENV)?,
            account: setting(&self.account, ACCOUNT_ENV),
            endpoint: setting(&self.endpoint, ENDPOINT_ENV),
        })
    }
}

#[async_trait]
impl Provider for SpotinstProvider {
    type Config<'a> = ProviderConfig;
    type MetaState<'a> = tf_provider::value::ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(Schema {
            version: 1,
            block: Block {
                description: Description::plain("Spotinst"),
                attributes: map! {
                    "token" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain(format!(
                            "Spotinst personal access token (default: env {TOKEN_ENV})"
                        )),
                        constraint: AttributeConstraint::Optional,
                        sensitive: true,
                        ..Default::default()
                    },
                    "account" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain(format!(
                            "Spotinst account id (default: env {ACCOUNT_ENV})"
                        )),
                        constraint: AttributeConstraint::Optional,
                        ..Default::default()
                    },
                    "endpoint" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain(format!(
                            "Base URL of the Spotinst API (default: env {ENDPOINT_ENV}, or {})",
                            crate::client::DEFAULT_ENDPOINT
                        )),
                        constraint: AttributeConstraint::Optional,
                        ..Default::default()
                    },
                },
                ..Default::default()
            },
        })
    }

    async fn validate<'a>(&self, _diags: &mut Diagnostics, _config: Self::Config<'a>) -> Option<()> {
        Some(())
    }

    async fn configure<'a>(
        &self,
        diags: &mut Diagnostics,
        terraform_version: String,
        config: Self::Config<'a>,
    ) -> Option<()> {
        let Some(credentials) = config.credentials(|name| std::env::var(name).ok()) else {
            diags.root_error(
                "Missing Spotinst token",
                format!("Set the `token` attribute of the provider or the {TOKEN_ENV} environment variable"),
            );
            return None;
        };

        let client = match Client::new(&credentials) {
            Ok(client) => client,
            Err(err) => {
                diags.root_error("Failed to build the Spotinst client", err.to_string());
                return None;
            }
        };
        tracing::debug!(
            terraform_version = %terraform_version,
            endpoint = client.base_url(),
            account = ?credentials.account,
            "spotinst provider configured"
        );

        *self.client.write().await = Some(client);
        Some(())
    }

    fn get_resources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn tf_provider::DynamicResource>>> {
        Some(map! {
            "aws_elastigroup" => GroupResource::new(self.client()),
            "mrscaler_aws" => ScalerResource::new(self.client()),
        })
    }

    fn get_data_sources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn tf_provider::DynamicDataSource>>> {
        Some(HashMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn credentials_prefer_attributes() {
        let config = ProviderConfig {
            token: Value::Value("attr-token".to_owned()),
            account: Value::Value("act-attr".to_owned()),
            endpoint: Value::Null,
        };
        let credentials = config
            .credentials(env(&[
                (TOKEN_ENV, "env-token"),
                (ACCOUNT_ENV, "act-env"),
                (ENDPOINT_ENV, "http://localhost:1234"),
            ]))
            .unwrap();
        assert_eq!(
            credentials,
            Credentials {
                token: "attr-token".to_owned(),
                account: Some("act-attr".to_owned()),
                endpoint: Some("http://localhost:1234".to_owned()),
            }
        );
    }

    #[test]
    fn credentials_require_token() {
        let config = ProviderConfig {
            token: Value::Value(String::new()),
            ..Default::default()
        };
        assert!(config.credentials(env(&[(ACCOUNT_ENV, "act-env")])).is_none());
        assert!(ProviderConfig::default()
            .credentials(env(&[(TOKEN_ENV, "env-token")]))
            .is_some());
    }

    #[test]
    fn token_is_sensitive() {
        let provider = SpotinstProvider::default();
        let schema = provider.schema(&mut Diagnostics::default()).unwrap();
        assert!(schema.block.attributes["token"].sensitive);
        assert!(!schema.block.attributes["account"].sensitive);
    }

    #[test]
    fn resources() {
        let provider = SpotinstProvider::default();
        let mut diags = Diagnostics::default();
        let resources = provider.get_resources(&mut diags).unwrap();
        let mut names: Vec<_> = resources.keys().cloned().collect();
        names.sort();
        assert_eq!(names, vec!["aws_elastigroup", "mrscaler_aws"]);
        assert!(provider.get_data_sources(&mut diags).unwrap().is_empty());
    }

    #[tokio::test]
    async fn configure_shares_the_client() {
        let provider = SpotinstProvider::default();
        let mut diags = Diagnostics::default();
        let config = ProviderConfig {
            token: Value::Value("token".to_owned()),
            endpoint: Value::Value("http://localhost:1234/".to_owned()),
            ..Default::default()
        };
        assert!(provider
            .configure(&mut diags, "1.9.0".to_owned(), config)
            .await
            .is_some());
        let client = configured_client(&provider.client(), &mut diags).await.unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234");
    }
}
