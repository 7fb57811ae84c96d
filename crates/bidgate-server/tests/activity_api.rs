//! Check endpoint and ops handlers, driven without a listener.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use bidgate_server::api::activity::{check, evaluate, CheckRequest};
use bidgate_server::app_state::AppState;
use bidgate_server::obs::metrics::{DEFAULT_MAX_COMPONENT_LABELS, OVERFLOW_COMPONENT};
use bidgate_server::policy::UNKNOWN_ACCOUNT;
use bidgate_server::{config, ops};

const CFG: &str = r#"
version: 1
activities:
  call_bidder:
    rules:
      - allow: false
        condition: { component_name: ["blocked"] }
  transmit_precise_geo:
    rules:
      - allow: false
        condition: { geo: ["USA.CA"] }
accounts:
  - id: "acme"
    trace_level: verbose
"#;

fn state() -> AppState {
    AppState::new(&config::load_from_str(CFG).unwrap()).unwrap()
}

fn request(v: Value) -> CheckRequest {
    serde_json::from_value(v).unwrap()
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[test]
fn batch_is_answered_in_order() {
    let state = state();
    let req = request(json!({
        "account": "acme",
        "checks": [
            { "activity": "call_bidder", "component_type": "bidder", "component_name": "blocked" },
            { "activity": "call_bidder", "component_type": "bidder", "component_name": "ok" },
            { "activity": "sync_user", "component_type": "user_id_module", "component_name": "uid" }
        ]
    }));

    let resp = evaluate(&state, &req).unwrap();
    assert_eq!(resp.account, "acme");
    assert!(resp.known_account);
    assert_eq!(resp.allowed, vec![false, true, true]);
}

#[test]
fn request_attributes_feed_contextual_rules() {
    let state = state();
    let req = request(json!({
        "account": "other",
        "request": { "country": "USA", "region": "CA" },
        "checks": [
            { "activity": "transmit_precise_geo", "component_type": "bidder", "component_name": "b" }
        ]
    }));
    assert_eq!(evaluate(&state, &req).unwrap().allowed, vec![false]);

    let req = request(json!({
        "account": "other",
        "request": { "country": "USA", "region": "NY" },
        "checks": [
            { "activity": "transmit_precise_geo", "component_type": "bidder", "component_name": "b" }
        ]
    }));
    assert_eq!(evaluate(&state, &req).unwrap().allowed, vec![true]);
}

#[test]
fn unknown_accounts_do_not_grow_account_series() {
    let state = AppState::new(
        &config::load_from_str(
            r#"
version: 1
server:
  trace_level: verbose
activities:
  call_bidder:
    default: false
"#,
        )
        .unwrap(),
    )
    .unwrap();

    let n = 1000;
    for i in 0..n {
        let req = request(json!({
            "account": format!("acct{i}"),
            "trace_level": "verbose",
            "checks": [
                { "activity": "call_bidder", "component_type": "bidder", "component_name": format!("b{i}") }
            ]
        }));
        let resp = evaluate(&state, &req).unwrap();
        assert!(!resp.known_account);
        assert_eq!(resp.account, format!("acct{i}"));
        assert_eq!(resp.allowed, vec![false]);
    }

    let metrics = state.metrics();
    let account_scope = |account: &str| {
        metrics.disallowed.get(&[
            ("scope", "account"),
            ("account", account),
            ("activity", "call_bidder"),
        ])
    };
    assert_eq!(account_scope("acct7"), 0);
    assert_eq!(account_scope(UNKNOWN_ACCOUNT), n);

    let overflow = metrics.disallowed.get(&[
        ("scope", "adapter"),
        ("component", OVERFLOW_COMPONENT),
        ("activity", "call_bidder"),
    ]);
    assert_eq!(overflow, n - DEFAULT_MAX_COMPONENT_LABELS as u64);
    // request + unknown account + capped adapters + overflow
    assert_eq!(metrics.disallowed.series(), 2 + DEFAULT_MAX_COMPONENT_LABELS + 1);
}

#[test]
fn invalid_component_names_are_rejected() {
    let state = state();
    let req = request(json!({
        "account": "acme",
        "checks": [
            { "activity": "call_bidder", "component_type": "bidder", "component_name": "a b" }
        ]
    }));
    let err = evaluate(&state, &req).unwrap_err();
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
    assert_eq!(state.metrics().disallowed.series(), 0);
}

#[test]
fn unknown_enum_values_do_not_deserialize() {
    let bad = json!({
        "account": "acme",
        "checks": [
            { "activity": "mine_crypto", "component_type": "bidder", "component_name": "b" }
        ]
    });
    assert!(serde_json::from_value::<CheckRequest>(bad).is_err());
}

#[tokio::test]
async fn empty_batch_is_bad_request() {
    let resp = check(
        State(state()),
        Json(request(json!({ "account": "acme", "checks": [] }))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn check_then_metrics() {
    let state = state();
    let resp = check(
        State(state.clone()),
        Json(request(json!({
            "account": "acme",
            "checks": [
                { "activity": "call_bidder", "component_type": "bidder", "component_name": "blocked" }
            ]
        }))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(body["allowed"], json!([false]));

    let text = body_string(ops::metrics(State(state)).await).await;
    assert!(text.contains("bidgate_activity_processed_rules_total{scope=\"request\"} 1"));
    assert!(text.contains(
        "bidgate_activity_processed_rules_total{account=\"acme\",scope=\"account\"} 1"
    ));
    assert!(text.contains(
        "bidgate_activity_disallowed_total{account=\"acme\",activity=\"call_bidder\",scope=\"account\"} 1"
    ));
    assert!(text.contains(
        "bidgate_activity_disallowed_total{activity=\"call_bidder\",component=\"blocked\",scope=\"adapter\"} 1"
    ));
}
