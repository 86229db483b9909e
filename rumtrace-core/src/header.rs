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

//! Browser monitoring header
//!
//! Decides whether a header can be emitted and renders it. Preconditions are
//! checked in a fixed order and the first one that fails is reported as an
//! HTML comment carrying its code:
//!
//! | code | cause |
//! |------|-------|
//! | 0 | browser monitoring disabled |
//! | 1 | no current transaction |
//! | 2 | reserved, never emitted |
//! | 3 | transaction has no name |
//! | 4 | no application id |

use crate::config::AgentConfig;
use crate::payload::BrowserPayload;
use crate::transaction::Transaction;
use std::fmt;
use tracing::{debug, error, warn};

const SCRIPT_OPEN: &str = "<script type='text/javascript'>window.NREUM||(NREUM={});NREUM.info = ";
const SCRIPT_CLOSE: &str = "</script>";

/// An unmet precondition for emitting the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RumIssue {
    /// `browser_monitoring.enable` is off
    Disabled = 0,
    /// Called outside a transaction
    NoTransaction = 1,
    /// The transaction has no name
    UnnamedTransaction = 3,
    /// `application_id` is not set
    MissingApplicationId = 4,
}

impl RumIssue {
    /// Numeric code embedded in the diagnostic comment.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn message(&self) -> &'static str {
        match self {
            RumIssue::Disabled => "browser monitoring headers not generated; disabled",
            RumIssue::NoTransaction => {
                "transaction missing while generating browser monitoring headers"
            }
            RumIssue::UnnamedTransaction => "browser monitoring headers need a transaction name",
            RumIssue::MissingApplicationId => "browser monitoring requires valid application_id",
        }
    }
}

impl fmt::Display for RumIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<!-- why is the rum gone? ({}) -->", self.code())
    }
}

/// The two shapes a browser monitoring header can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserHeader {
    /// Inert comment naming the failed precondition.
    Diagnostic(RumIssue),
    /// Rendered injection script.
    Script(String),
}

impl BrowserHeader {
    pub fn is_script(&self) -> bool {
        matches!(self, BrowserHeader::Script(_))
    }

    pub fn issue(&self) -> Option<RumIssue> {
        match self {
            BrowserHeader::Diagnostic(issue) => Some(*issue),
            BrowserHeader::Script(_) => None,
        }
    }

    fn fail(issue: RumIssue) -> Self {
        warn!(code = issue.code(), "{}", issue.message());
        BrowserHeader::Diagnostic(issue)
    }
}

impl fmt::Display for BrowserHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserHeader::Diagnostic(issue) => fmt::Display::fmt(issue, f),
            BrowserHeader::Script(script) => f.write_str(script),
        }
    }
}

/// Evaluate the preconditions and build the header.
pub fn build_header(config: &AgentConfig, transaction: Option<&Transaction>) -> BrowserHeader {
    let bm = &config.browser_monitoring;
    if !bm.enable {
        return BrowserHeader::fail(RumIssue::Disabled);
    }

    let Some(txn) = transaction else {
        return BrowserHeader::fail(RumIssue::NoTransaction);
    };

    let Some(name) = txn.name() else {
        return BrowserHeader::fail(RumIssue::UnnamedTransaction);
    };

    let Some(application_id) = config.application_id else {
        return BrowserHeader::fail(RumIssue::MissingApplicationId);
    };

    let payload = BrowserPayload::new(config, application_id, txn, &name);
    let json = match payload.to_json(bm.debug) {
        Ok(json) => json,
        Err(e) => {
            error!(error = %e, "failed to serialize browser monitoring payload");
            return BrowserHeader::Diagnostic(RumIssue::Disabled);
        }
    };

    let loader = if bm.debug {
        bm.js_agent_loader.clone()
    } else {
        single_line(&bm.js_agent_loader)
    };

    let mut script =
        String::with_capacity(SCRIPT_OPEN.len() + json.len() + loader.len() + SCRIPT_CLOSE.len() + 2);
    script.push_str(SCRIPT_OPEN);
    script.push_str(&json);
    script.push_str("; ");
    script.push_str(&loader);
    script.push_str(SCRIPT_CLOSE);

    debug!(
        application_id,
        transaction_id = txn.id(),
        pretty = bm.debug,
        "generated browser monitoring header"
    );
    BrowserHeader::Script(script)
}

/// Join the non-blank lines of `text` with single spaces.
fn single_line(text: &str) -> String {
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the header as the string to embed in the page.
pub fn make_browser_monitoring_header(
    config: &AgentConfig,
    transaction: Option<&Transaction>,
) -> String {
    build_header(config, transaction).to_string()
}
