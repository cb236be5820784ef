//! End-to-end lifecycle and query scenarios against an in-memory transport.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use coldtrace_ledger_state::{IndexManager, LifecycleEngine, MemoryTransport, QueryEngine};
use coldtrace_ledger_types::{LedgerError, NewPackage, PackageStatus, Role};

fn meds(id: &str) -> NewPackage {
    NewPackage {
        id: id.to_string(),
        shipper: "S1".to_string(),
        insurer: "I1".to_string(),
        consignee: "C1".to_string(),
        provider: "P1".to_string(),
        temperature_min: -5,
        temperature_max: 5,
        description: "meds".to_string(),
    }
}

#[test]
fn untouched_ledger_lists_no_ids_after_initialize() {
    let transport = MemoryTransport::new();
    IndexManager::new(&transport).initialize().expect("initialize");

    let queries = QueryEngine::new(&transport);
    assert_eq!(queries.all_ids().expect("ids"), Vec::<String>::new());
    assert!(queries.all().expect("records").is_empty());
}

#[test]
fn cold_chain_breach_ends_the_lifecycle() {
    let transport = MemoryTransport::new();
    IndexManager::new(&transport).initialize().expect("initialize");
    let lifecycle = LifecycleEngine::new(&transport);

    let record = lifecycle.create(meds("PKG1")).expect("create");
    assert_eq!(record.status, PackageStatus::Created);

    let record = lifecycle.accept("PKG1", "P1").expect("accept");
    assert_eq!(record.status, PackageStatus::InTransit);

    // 10 exceeds the +5 ceiling: the package is damaged for good.
    let record = lifecycle.record_temperature("PKG1", 10).expect("reading");
    assert_eq!(record.status, PackageStatus::Damaged);

    let err = lifecycle.deliver("PKG1", "P1").unwrap_err();
    assert!(matches!(err, LedgerError::InvalidTransition { status: PackageStatus::Damaged, .. }));

    // The damaged record is still visible to role queries.
    let queries = QueryEngine::new(&transport);
    let by_provider = queries.by_role(Role::Provider, "P1").expect("query");
    assert_eq!(by_provider.len(), 1);
    assert_eq!(by_provider[0].id, "PKG1");
    assert_eq!(by_provider[0].status, PackageStatus::Damaged);
}

#[test]
fn healthy_run_reaches_delivered() {
    let transport = MemoryTransport::new();
    IndexManager::new(&transport).initialize().expect("initialize");
    let lifecycle = LifecycleEngine::new(&transport);

    lifecycle.create(meds("PKG1")).expect("create");
    lifecycle.accept("PKG1", "P1").expect("accept");
    for reading in [-5, -1, 3, 5] {
        lifecycle.record_temperature("PKG1", reading).expect("reading");
    }
    let record = lifecycle.deliver("PKG1", "P1").expect("deliver");
    assert_eq!(record.status, PackageStatus::Delivered);

    // Terminal: further telemetry is rejected and the status sticks.
    let err = lifecycle.record_temperature("PKG1", 0).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidTransition { .. }));
    let record = QueryEngine::new(&transport).by_id("PKG1").expect("query");
    assert_eq!(record.status, PackageStatus::Delivered);
}

#[test]
fn role_and_status_query_equals_filtered_full_scan() {
    let transport = MemoryTransport::new();
    IndexManager::new(&transport).initialize().expect("initialize");
    let lifecycle = LifecycleEngine::new(&transport);

    for (id, provider) in [("PKG1", "P1"), ("PKG2", "P2"), ("PKG3", "P1"), ("PKG4", "P1")] {
        let mut package = meds(id);
        package.provider = provider.to_string();
        lifecycle.create(package).expect("create");
    }
    lifecycle.accept("PKG1", "P1").expect("accept");
    lifecycle.accept("PKG3", "P1").expect("accept");
    lifecycle.record_temperature("PKG3", -40).expect("damage");

    let queries = QueryEngine::new(&transport);
    for status in
        [PackageStatus::Created, PackageStatus::InTransit, PackageStatus::Damaged]
    {
        let direct =
            queries.by_role_and_status(Role::Provider, "P1", status).expect("combined query");
        let filtered: Vec<_> = queries
            .all()
            .expect("query all")
            .into_iter()
            .filter(|r| r.provider == "P1" && r.status == status)
            .collect();
        assert_eq!(direct, filtered, "status {status}");
    }
}

#[test]
fn creation_order_is_stable_across_status_changes() {
    let transport = MemoryTransport::new();
    IndexManager::new(&transport).initialize().expect("initialize");
    let lifecycle = LifecycleEngine::new(&transport);

    for id in ["Z", "A", "M"] {
        lifecycle.create(meds(id)).expect("create");
    }
    lifecycle.accept("M", "P1").expect("accept");
    lifecycle.deliver("M", "P1").expect("deliver");

    let queries = QueryEngine::new(&transport);
    let order: Vec<String> =
        queries.all().expect("query all").into_iter().map(|r| r.id).collect();
    assert_eq!(order, vec!["Z", "A", "M"]);
}

#[test]
fn failed_guards_leave_no_trace_in_the_store() {
    let transport = MemoryTransport::new();
    IndexManager::new(&transport).initialize().expect("initialize");
    let lifecycle = LifecycleEngine::new(&transport);

    lifecycle.create(meds("PKG1")).expect("create");
    let keys_before = transport.len();

    // Duplicate create, wrong provider, and double-accept all fail closed.
    lifecycle.create(meds("PKG1")).unwrap_err();
    lifecycle.accept("PKG1", "P2").unwrap_err();
    lifecycle.accept("PKG1", "P1").expect("accept");
    lifecycle.accept("PKG1", "P1").unwrap_err();

    assert_eq!(transport.len(), keys_before);
    let queries = QueryEngine::new(&transport);
    assert_eq!(queries.all_ids().expect("ids"), vec!["PKG1"]);
    assert_eq!(queries.by_id("PKG1").expect("query").status, PackageStatus::InTransit);
}

#[test]
fn read_your_writes_within_one_invocation() {
    let transport = MemoryTransport::new();
    IndexManager::new(&transport).initialize().expect("initialize");
    let lifecycle = LifecycleEngine::new(&transport);

    // create() itself re-reads the index it just rewrote on the next call;
    // two sequential creates prove the transport observes its own writes.
    lifecycle.create(meds("PKG1")).expect("create");
    lifecycle.create(meds("PKG2")).expect("create");
    assert_eq!(
        QueryEngine::new(&transport).all_ids().expect("ids"),
        vec!["PKG1", "PKG2"]
    );
}
