//! Integration tests for the `archtest::check!()` macro and `in_path()`.

// Full pipeline: macro expansion, config load, Go extraction, validation, pass.
archtest::check!(config = "crates/archtest/tests/archtest-test.toml");

use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/shop")
}

#[test]
fn in_path_reads_fixture_tree() {
    let universe = archtest::in_path(fixture());
    let mut names: Vec<&str> = universe.records().iter().map(|r| r.name()).collect();
    names.sort_unstable();
    assert_eq!(
        names,
        [
            "Line",
            "MemoryOrderRepository",
            "Order",
            "OrderHandler",
            "OrderRepository",
            "PlaceOrderService"
        ]
    );
}

#[test]
fn presentation_may_use_application_but_not_infrastructure() {
    let universe = archtest::in_path(fixture());

    let uses_application = universe
        .that()
        .resides_in_namespace("internal/presentation")
        .should()
        .have_dependency_on("internal/application")
        .evaluate();
    assert!(uses_application.is_success());

    let uses_infrastructure = universe
        .that()
        .resides_in_namespace("internal/presentation")
        .should_not()
        .have_dependency_on("internal/infrastructure")
        .evaluate();
    assert!(uses_infrastructure.is_success(), "{}", uses_infrastructure.failure_details());
}

#[test]
fn implemented_ports_are_found_by_method_name() {
    let universe = archtest::in_path(fixture());
    let ports = universe.that().implement_interface("Save").records();
    assert_eq!(ports.len(), 1);
    assert_eq!(ports[0].name(), "OrderRepository");
}
