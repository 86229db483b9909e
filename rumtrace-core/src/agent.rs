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

//! Agent facade
//!
//! Holds the live configuration and hands out immutable snapshots. The
//! header path works on a snapshot, so a concurrent reload never changes a
//! header halfway through rendering.

use crate::config::AgentConfig;
use crate::header::make_browser_monitoring_header;
use crate::transaction::Transaction;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Entry point used by the view layer.
///
/// # Example
///
/// ```
/// use rumtrace_core::{Agent, AgentConfig, Transaction};
///
/// let agent = Agent::new(AgentConfig::default());
/// let txn = Transaction::new();
/// txn.set_name("hello");
///
/// assert_eq!(
///     agent.browser_timing_header(Some(&txn)),
///     "<!-- why is the rum gone? (0) -->"
/// );
/// ```
#[derive(Debug)]
pub struct Agent {
    config: RwLock<Arc<AgentConfig>>,
}

impl Agent {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config: RwLock::new(Arc::new(config)),
        }
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Arc<AgentConfig> {
        Arc::clone(&self.config.read())
    }

    /// Replace the configuration. Takes effect on the next header.
    pub fn reload(&self, config: AgentConfig) {
        info!(
            enabled = config.browser_monitoring.enable,
            application_id = ?config.application_id,
            "reloading agent configuration"
        );
        *self.config.write() = Arc::new(config);
    }

    /// Header for the given transaction under the current configuration.
    pub fn browser_timing_header(&self, transaction: Option<&Transaction>) -> String {
        let config = self.config();
        make_browser_monitoring_header(&config, transaction)
    }
}
