//! Unit tests for the layering lint.

use std::path::PathBuf;

use rstest::rstest;

use super::*;

fn lint_one(file: &str, contents: &str) -> Result<(), ArchitectureLintError> {
    lint_sources(&[LintSource {
        file: PathBuf::from(file),
        contents: contents.to_owned(),
    }])
}

#[rstest]
#[case::state_uses_ports(
    "state/events.rs",
    "use crate::domain::ports::EventApi; fn f(_: &dyn EventApi) {}",
    true
)]
#[case::state_uses_http_adapter(
    "state/events.rs",
    "use crate::outbound::http::ConnectHttpClient; fn f(_: ConnectHttpClient) {}",
    false
)]
#[case::state_uses_adapter_by_crate_name(
    "state/events.rs",
    "use connect::outbound::http::ConnectHttpClient; fn f(_: ConnectHttpClient) {}",
    false
)]
#[case::state_uses_reqwest(
    "state/events.rs",
    "fn f(_: reqwest::Client) {}",
    false
)]
#[case::domain_uses_state(
    "domain/event.rs",
    "use super::super::state::SliceStore; fn f() {}",
    false
)]
#[case::domain_uses_diesel(
    "domain/platform_setting.rs",
    "use diesel::prelude::*; fn f() {}",
    false
)]
#[case::domain_test_attribute(
    "domain/event.rs",
    "#[tokio::test] async fn t() {}",
    true
)]
#[case::outbound_uses_state(
    "outbound/http/resources.rs",
    "use crate::state::EventsSlice; fn f() {}",
    false
)]
#[case::outbound_uses_diesel(
    "outbound/persistence/pool.rs",
    "use diesel_async::AsyncPgConnection; fn f() {}",
    true
)]
#[case::outbound_uses_seeding(
    "outbound/memory/mod.rs",
    "use crate::seeding::load_registry; fn f() {}",
    false
)]
fn checks_layer_boundaries(#[case] file: &str, #[case] contents: &str, #[case] ok: bool) {
    let result = lint_one(file, contents);
    assert_eq!(result.is_ok(), ok, "result: {result:?}");
}

#[rstest]
fn files_outside_layers_are_rejected() {
    let err = lint_one("config.rs", "fn f() {}").expect_err("unknown layer");
    assert!(matches!(err, ArchitectureLintError::Parse { .. }));
}

#[rstest]
fn repeated_paths_are_reported_once() {
    let err = lint_one(
        "state/reports.rs",
        "use reqwest::Client; fn f(_: reqwest::Client) {}",
    )
    .expect_err("violation");
    let ArchitectureLintError::Violations(violations) = err else {
        panic!("expected violations, got {err:?}");
    };
    assert_eq!(violations.len(), 1);
    assert!(violations[0].message.contains("`reqwest`"));
}
