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

//! Integration tests for browser monitoring header generation

use proptest::prelude::*;
use rumtrace_core::{
    deobfuscate_name, make_browser_monitoring_header, Agent, AgentConfig, Transaction,
};
use std::io::Write;

const LICENSE_KEY: &str = "0123456789abcdef0123";

fn agent_config() -> AgentConfig {
    let mut config = AgentConfig::default();
    config.license_key = LICENSE_KEY.into();
    config.browser_monitoring.enable = true;
    config.browser_monitoring.debug = false;
    config
}

fn named(name: &str) -> Transaction {
    let txn = Transaction::new();
    txn.set_name(name);
    txn
}

#[test]
fn test_disabled_header() {
    let mut config = agent_config();
    config.browser_monitoring.enable = false;
    assert_eq!(
        make_browser_monitoring_header(&config, None),
        "<!-- why is the rum gone? (0) -->"
    );
}

#[test]
fn test_outside_transaction() {
    assert_eq!(
        make_browser_monitoring_header(&agent_config(), None),
        "<!-- why is the rum gone? (1) -->"
    );
}

#[test]
fn test_transaction_without_name() {
    let txn = Transaction::new();
    assert_eq!(
        make_browser_monitoring_header(&agent_config(), Some(&txn)),
        "<!-- why is the rum gone? (3) -->"
    );
}

#[test]
fn test_without_application_id() {
    let txn = named("hello");
    assert_eq!(
        make_browser_monitoring_header(&agent_config(), Some(&txn)),
        "<!-- why is the rum gone? (4) -->"
    );
}

#[test]
fn test_named_transaction_gets_script() {
    let mut config = agent_config();
    config.application_id = Some(12345);
    let txn = named("hello");

    let header = make_browser_monitoring_header(&config, Some(&txn));
    assert_eq!(header.find("<script"), Some(0));
}

#[test]
fn test_pretty_print_when_debugging() {
    let mut config = agent_config();
    config.browser_monitoring.debug = true;
    config.application_id = Some(12345);
    let txn = named("hello");

    let lines = make_browser_monitoring_header(&config, Some(&txn))
        .split('\n')
        .count();
    assert!(lines > 5, "expected pretty output, got {} lines", lines);
}

#[test]
fn test_compact_when_not_debugging() {
    let mut config = agent_config();
    config.application_id = Some(12345);
    let txn = named("hello");

    let lines = make_browser_monitoring_header(&config, Some(&txn))
        .split('\n')
        .count();
    assert_eq!(lines, 1);
}

#[test]
fn test_compact_with_multiline_loader() {
    let mut config = agent_config();
    config.application_id = Some(12345);
    config.browser_monitoring.js_agent_loader = "window.NREUM=1;\nwindow.x=2;\n".into();
    let txn = named("hello");

    let header = make_browser_monitoring_header(&config, Some(&txn));
    assert_eq!(header.split('\n').count(), 1);
    assert!(header.ends_with("; window.NREUM=1; window.x=2;</script>"));
}

#[test]
fn test_idempotent_for_ended_transaction() {
    let mut config = agent_config();
    config.application_id = Some(12345);
    let txn = named("hello");
    txn.end();

    let first = make_browser_monitoring_header(&config, Some(&txn));
    let second = make_browser_monitoring_header(&config, Some(&txn));
    assert_eq!(first, second);
}

#[test]
fn test_payload_carries_obfuscated_name() {
    let mut config = agent_config();
    config.application_id = Some(12345);
    let txn = named("WebTransaction/Uri/hello");
    txn.end();

    let header = make_browser_monitoring_header(&config, Some(&txn));
    let json = header
        .strip_prefix("<script type='text/javascript'>window.NREUM||(NREUM={});NREUM.info = ")
        .and_then(|rest| rest.strip_suffix("; </script>"))
        .expect("script wrapper");

    let info: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(info["applicationID"], 12345);
    assert_eq!(info["licenseKey"], LICENSE_KEY);
    assert_eq!(info["ttGuid"], txn.id());
    assert!(info["agentToken"].is_null());

    let encoded = info["transactionName"].as_str().unwrap();
    assert_eq!(
        deobfuscate_name(encoded, LICENSE_KEY).unwrap(),
        "WebTransaction/Uri/hello"
    );
}

#[test]
fn test_agent_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
license_key = "{}"
application_id = 12345

[browser_monitoring]
enable = true
debug = true
"#,
        LICENSE_KEY
    )
    .unwrap();

    let config = AgentConfig::from_file(file.path()).unwrap();
    let agent = Agent::new(config);
    let txn = named("hello");

    let header = agent.browser_timing_header(Some(&txn));
    assert!(header.starts_with("<script"));
    assert!(header.lines().count() > 5);
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = AgentConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, rumtrace_core::RumError::Io(_)));
}

fn arb_config() -> impl Strategy<Value = AgentConfig> {
    (
        any::<bool>(),
        any::<bool>(),
        proptest::option::of(any::<u64>()),
        "[a-z0-9]{0,40}",
        "([a-zA-Z=;. ]{0,12}(\n|\r\n|\r)?){0,4}",
    )
        .prop_map(|(enable, debug, application_id, license_key, loader)| {
            let mut config = AgentConfig::default();
            config.browser_monitoring.enable = enable;
            config.browser_monitoring.debug = debug;
            config.application_id = application_id;
            config.license_key = license_key;
            config.browser_monitoring.js_agent_loader = loader;
            config
        })
}

proptest! {
    #[test]
    fn prop_disabled_always_code_zero(
        mut config in arb_config(),
        has_txn in any::<bool>(),
        name in proptest::option::of("[A-Za-z/]{0,20}"),
    ) {
        config.browser_monitoring.enable = false;
        let txn = Transaction::new();
        if let Some(name) = name {
            txn.set_name(name);
        }
        let header = make_browser_monitoring_header(&config, has_txn.then_some(&txn));
        prop_assert_eq!(header, "<!-- why is the rum gone? (0) -->");
    }

    #[test]
    fn prop_no_transaction_always_code_one(mut config in arb_config()) {
        config.browser_monitoring.enable = true;
        prop_assert_eq!(
            make_browser_monitoring_header(&config, None),
            "<!-- why is the rum gone? (1) -->"
        );
    }

    #[test]
    fn prop_eligible_is_script_with_expected_shape(
        mut config in arb_config(),
        application_id in any::<u64>(),
        name in "[A-Za-z0-9/_.]{1,64}",
    ) {
        config.browser_monitoring.enable = true;
        config.application_id = Some(application_id);
        let txn = Transaction::new();
        txn.set_name(name);

        let header = make_browser_monitoring_header(&config, Some(&txn));
        prop_assert!(header.starts_with("<script"));
        prop_assert!(header.ends_with("</script>"));

        let lines = header.split('\n').count();
        if config.browser_monitoring.debug {
            prop_assert!(lines > 5);
        } else {
            prop_assert_eq!(lines, 1);
            prop_assert!(!header.contains('\r'));
        }
    }
}
