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

//! Agent configuration
//!
//! An immutable snapshot of the settings the header builder reads. Loaded
//! from defaults, then a TOML file, then `RUMTRACE_*` environment variables.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Default beacon host for both timing and error beacons.
pub const DEFAULT_BEACON: &str = "bam.nr-data.net";

/// Agent configuration snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Account license key. Its first 13 bytes key the name obfuscation.
    #[serde(default)]
    pub license_key: String,

    /// Application id assigned by the collector on connect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<u64>,

    /// Browser monitoring settings.
    #[serde(default)]
    pub browser_monitoring: BrowserMonitoringConfig,
}

/// Settings under `[browser_monitoring]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserMonitoringConfig {
    /// Emit the header at all.
    #[serde(default)]
    pub enable: bool,

    /// Pretty-print the payload across multiple lines.
    #[serde(default)]
    pub debug: bool,

    /// Key reported to the browser agent. Falls back to the license key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_key: Option<String>,

    /// Loader script appended after the payload.
    #[serde(default)]
    pub js_agent_loader: String,

    /// Browser agent script location.
    #[serde(default)]
    pub js_agent_file: String,

    #[serde(default = "default_beacon")]
    pub beacon: String,

    #[serde(default = "default_beacon")]
    pub error_beacon: String,
}

fn default_beacon() -> String {
    DEFAULT_BEACON.to_string()
}

impl Default for BrowserMonitoringConfig {
    fn default() -> Self {
        Self {
            enable: false,
            debug: false,
            browser_key: None,
            js_agent_loader: String::new(),
            js_agent_file: String::new(),
            beacon: default_beacon(),
            error_beacon: default_beacon(),
        }
    }
}

impl AgentConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Render this configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply `RUMTRACE_*` overrides from the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply `RUMTRACE_*` overrides from an arbitrary lookup.
    ///
    /// Values that do not parse are ignored and logged.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("RUMTRACE_LICENSE_KEY") {
            self.license_key = key;
        }

        if let Some(raw) = lookup("RUMTRACE_APPLICATION_ID") {
            match raw.trim().parse::<u64>() {
                Ok(id) => self.application_id = Some(id),
                Err(_) => warn!(value = %raw, "ignoring invalid RUMTRACE_APPLICATION_ID"),
            }
        }

        if let Some(raw) = lookup("RUMTRACE_BROWSER_MONITOR_ENABLE") {
            match parse_bool(&raw) {
                Some(v) => self.browser_monitoring.enable = v,
                None => warn!(value = %raw, "ignoring invalid RUMTRACE_BROWSER_MONITOR_ENABLE"),
            }
        }

        if let Some(raw) = lookup("RUMTRACE_BROWSER_MONITOR_DEBUG") {
            match parse_bool(&raw) {
                Some(v) => self.browser_monitoring.debug = v,
                None => warn!(value = %raw, "ignoring invalid RUMTRACE_BROWSER_MONITOR_DEBUG"),
            }
        }

        if let Some(key) = lookup("RUMTRACE_BROWSER_KEY") {
            self.browser_monitoring.browser_key = Some(key);
        }

        self
    }

    /// Key reported as `licenseKey` in the browser payload.
    pub fn browser_key(&self) -> &str {
        self.browser_monitoring
            .browser_key
            .as_deref()
            .unwrap_or(&self.license_key)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
