// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
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

//! Browser agent payload
//!
//! The object assigned to `NREUM.info` in the injected script. Key names and
//! order are read by the browser agent and must not change.

use crate::config::AgentConfig;
use crate::error::Result;
use crate::obfuscate::obfuscate_name;
use crate::transaction::Transaction;
use serde::Serialize;

/// Payload handed to the browser agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserPayload {
    pub agent: String,
    pub beacon: String,
    pub error_beacon: String,
    pub license_key: String,
    #[serde(rename = "applicationID")]
    pub application_id: u64,
    /// Milliseconds spent in the transaction so far.
    pub application_time: u64,
    /// Obfuscated transaction name.
    pub transaction_name: String,
    pub queue_time: u64,
    pub tt_guid: String,
    /// Always null; reserved by the browser agent.
    pub agent_token: Option<String>,
}

impl BrowserPayload {
    /// Assemble the payload for a named transaction.
    pub fn new(
        config: &AgentConfig,
        application_id: u64,
        transaction: &Transaction,
        name: &str,
    ) -> Self {
        let bm = &config.browser_monitoring;
        Self {
            agent: bm.js_agent_file.clone(),
            beacon: bm.beacon.clone(),
            error_beacon: bm.error_beacon.clone(),
            license_key: config.browser_key().to_string(),
            application_id,
            application_time: transaction.duration_ms(),
            transaction_name: obfuscate_name(name, &config.license_key),
            queue_time: transaction.queue_time_ms(),
            tt_guid: transaction.id().to_string(),
            agent_token: None,
        }
    }

    /// Serialize to JSON, pretty-printed when `pretty` is set.
    ///
    /// `</` is written as `<\/` so the result is safe inside a script element.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json.replace("</", "<\\/"))
    }
}
