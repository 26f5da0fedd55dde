//! Ordering of scan and metric listings for [`InMemoryRecordStore`].

use crate::in_memory::helpers::{FixedClock, runtime, seed_project, store};
use nvx29::records::{
    adapters::memory::InMemoryRecordStore,
    domain::{
        JsonObject, MetricReadings, NewMetric, NewSbom, PageRequest, ProjectId, SecurityScore,
    },
    ports::{MetricRepository, SbomRepository},
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// The latest scan is chosen by generation time, not insertion order.
#[rstest]
fn latest_sbom_follows_generation_time(runtime: io::Result<Runtime>, store: InMemoryRecordStore) {
    let rt = runtime.expect("runtime creation");
    let project = seed_project(&rt, &store, "alpha").expect("seed project");
    let late = FixedClock::at(10, 0).expect("clock");
    let early = FixedClock::at(9, 0).expect("clock");

    let newest_draft = NewSbom::new(project.id(), "2.0", JsonObject::new(), &late)
        .expect("draft")
        .with_security_score(SecurityScore::new(42.0).expect("score"));
    let oldest_draft = NewSbom::new(project.id(), "1.0", JsonObject::new(), &early).expect("draft");
    let newest = rt.block_on(store.create_sbom(&newest_draft)).expect("store scan");
    let oldest = rt.block_on(store.create_sbom(&oldest_draft)).expect("store scan");

    let latest = rt
        .block_on(store.latest_sbom(project.id()))
        .expect("lookup")
        .expect("scan should exist");
    assert_eq!(latest.id(), newest.id());

    let listed: Vec<_> = rt
        .block_on(store.list_sboms(project.id()))
        .expect("listing")
        .iter()
        .map(|sbom| sbom.id())
        .collect();
    assert_eq!(listed, [newest.id(), oldest.id()]);
}

/// Equal generation times fall back to descending identifiers.
#[rstest]
fn sbom_ties_prefer_higher_identifier(runtime: io::Result<Runtime>, store: InMemoryRecordStore) {
    let rt = runtime.expect("runtime creation");
    let project = seed_project(&rt, &store, "alpha").expect("seed project");
    let frozen = FixedClock::at(12, 0).expect("clock");

    let mut ids = Vec::new();
    for version in ["1", "2", "3"] {
        let draft = NewSbom::new(project.id(), version, JsonObject::new(), &frozen).expect("draft");
        ids.push(rt.block_on(store.create_sbom(&draft)).expect("store scan").id());
    }
    ids.reverse();

    let listed: Vec<_> = rt
        .block_on(store.list_sboms(project.id()))
        .expect("listing")
        .iter()
        .map(|sbom| sbom.id())
        .collect();
    assert_eq!(listed, ids);
    assert_eq!(
        rt.block_on(store.latest_sbom(project.id()))
            .expect("lookup")
            .map(|sbom| sbom.id()),
        ids.first().copied()
    );
}

/// Metric samples page newest first.
#[rstest]
fn metric_pages_are_newest_first(runtime: io::Result<Runtime>, store: InMemoryRecordStore) {
    let rt = runtime.expect("runtime creation");
    let project = seed_project(&rt, &store, "alpha").expect("seed project");

    for (minute, rpm) in [(5, 50), (1, 10), (9, 90), (3, 30)] {
        let clock = FixedClock::at(8, minute).expect("clock");
        let readings = MetricReadings::new().with_requests_per_minute(rpm);
        rt.block_on(store.create_metric(&NewMetric::new(project.id(), readings, &clock)))
            .expect("store sample");
    }

    let rates = |page: PageRequest| -> Vec<u64> {
        rt.block_on(store.list_metrics(project.id(), page))
            .expect("listing")
            .iter()
            .map(|metric| metric.readings().requests_per_minute())
            .collect()
    };

    assert_eq!(rates(PageRequest::default()), [90, 50, 30, 10]);
    assert_eq!(rates(PageRequest::new(1, 2)), [50, 30]);

    let latest = rt
        .block_on(store.latest_metric(project.id()))
        .expect("lookup")
        .expect("sample should exist");
    assert_eq!(latest.readings().requests_per_minute(), 90);
}

/// Listings for an unknown project are empty rather than failing.
#[rstest]
fn unknown_project_listings_are_empty(runtime: io::Result<Runtime>, store: InMemoryRecordStore) {
    let rt = runtime.expect("runtime creation");
    let ghost = ProjectId::new(31);

    assert!(rt.block_on(store.list_sboms(ghost)).expect("listing").is_empty());
    assert!(
        rt.block_on(store.list_metrics(ghost, PageRequest::default()))
            .expect("listing")
            .is_empty()
    );
    assert!(rt.block_on(store.latest_sbom(ghost)).expect("lookup").is_none());
}
