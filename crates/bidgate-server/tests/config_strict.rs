#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use bidgate_core::activity::{Activity, ComponentType, TraceLevel};
use bidgate_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
activities:
  call_bidder:
    rules:
      - allow: false
        condition: { component_nmae: ["a"] } # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn unknown_activity_key_fails() {
    let bad = r#"
version: 1
activities:
  fetch_everything: {}
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn wrong_version_fails() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert_eq!(cfg.server.trace_level, TraceLevel::Basic);
    assert!(cfg.activities.is_empty());
    assert!(cfg.accounts.is_empty());
}

#[test]
fn ok_full_config() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:9000"
  trace_level: verbose
activities:
  call_bidder:
    default: true
    rules:
      - allow: false
        condition:
          component_type: [bidder]
          component_name: ["blocked"]
  transmit_precise_geo:
    default: false
accounts:
  - id: "acme"
    trace_level: basic
    activities:
      sync_user:
        default: false
        inherit: false
        rules:
          - allow: true
            condition:
              any:
                - { geo: ["USA.CA"] }
                - { gpp_sid: [7, 8] }
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.trace_level, TraceLevel::Verbose);
    let call = &cfg.activities[&Activity::CallBidder];
    assert!(call.default);
    assert_eq!(
        call.rules[0].condition.component_type.as_deref(),
        Some(&[ComponentType::Bidder][..])
    );
    assert!(!cfg.activities[&Activity::TransmitPreciseGeo].default);

    let acme = &cfg.accounts[0];
    assert_eq!(acme.trace_level, Some(TraceLevel::Basic));
    let sync = &acme.activities[&Activity::SyncUser];
    assert_eq!(sync.default, Some(false));
    assert!(!sync.inherit);
}

#[test]
fn rejects_bad_rules_at_load() {
    let bad_geo = r#"
version: 1
activities:
  transmit_ufpd:
    rules:
      - allow: false
        condition: { geo: ["USA."] }
"#;
    let err = config::load_from_str(bad_geo).expect_err("must fail");
    assert!(err.to_string().contains("activities.transmit_ufpd"), "{err}");

    let empty_names = r#"
version: 1
accounts:
  - id: "acme"
    activities:
      call_bidder:
        rules:
          - allow: false
            condition: { component_name: [] }
"#;
    let err = config::load_from_str(empty_names).expect_err("must fail");
    assert!(err.to_string().contains("accounts[acme]"), "{err}");
}

#[test]
fn rejects_duplicate_and_empty_accounts() {
    let dup = r#"
version: 1
accounts:
  - id: "acme"
  - id: "acme"
"#;
    assert!(config::load_from_str(dup).is_err());

    let empty = r#"
version: 1
accounts:
  - id: " "
"#;
    assert!(config::load_from_str(empty).is_err());
}

#[test]
fn rejects_reserved_account_id() {
    let reserved = r#"
version: 1
accounts:
  - id: "unknown"
"#;
    let err = config::load_from_str(reserved).expect_err("must fail");
    assert!(err.to_string().contains("reserved"), "{err}");
}

#[test]
fn rejects_bad_listen_address() {
    let bad = r#"
version: 1
server:
  listen: "not-an-addr"
"#;
    assert!(config::load_from_str(bad).is_err());
}
