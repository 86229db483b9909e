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

//! # Rumtrace Core
//!
//! Browser monitoring (RUM) header generation for APM agents.
//!
//! The header is a short HTML fragment injected just before `</body>` so the
//! browser agent can tie page timing back to the server-side transaction.
//! When the header cannot be produced, an inert diagnostic comment is returned
//! instead, carrying a numeric code for the unmet precondition.
//!
//! ## Quick Start
//!
//! ```
//! use rumtrace_core::{make_browser_monitoring_header, AgentConfig, Transaction};
//!
//! let mut config = AgentConfig::default();
//! config.browser_monitoring.enable = true;
//! config.application_id = Some(12345);
//! config.license_key = "0123456789abcdef".into();
//!
//! let txn = Transaction::new();
//! assert_eq!(
//!     make_browser_monitoring_header(&config, Some(&txn)),
//!     "<!-- why is the rum gone? (3) -->"
//! );
//!
//! txn.set_name("WebTransaction/Uri/hello");
//! assert!(make_browser_monitoring_header(&config, Some(&txn)).starts_with("<script"));
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod header;
pub mod obfuscate;
pub mod payload;
pub mod transaction;

pub use agent::Agent;
pub use config::{AgentConfig, BrowserMonitoringConfig, DEFAULT_BEACON};
pub use error::{Result, RumError};
pub use header::{build_header, make_browser_monitoring_header, BrowserHeader, RumIssue};
pub use obfuscate::{deobfuscate_name, obfuscate_name, OBFUSCATION_KEY_LEN};
pub use payload::BrowserPayload;
pub use transaction::Transaction;
