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

use std::sync::Arc;

use serde_json::Value as Json;
use terraform_provider_spotinst::client::{Client, Credentials};
use terraform_provider_spotinst::provider::SharedClient;
use tokio::sync::RwLock;

/// Client talking to the mock server
pub fn shared_client(server: &mockito::Server) -> SharedClient {
    let client = Client::new(&Credentials {
        token: "secret".to_owned(),
        account: Some("act-1".to_owned()),
        endpoint: Some(server.url()),
    })
    .unwrap();
    Arc::new(RwLock::new(Some(client)))
}

/// Body of a successful Spotinst response holding a single item
pub fn items(item: Json) -> String {
    serde_json::json!({
        "request": {"id": "req-1"},
        "response": {"status": {"code": 200, "message": "OK"}, "items": [item]},
    })
    .to_string()
}
