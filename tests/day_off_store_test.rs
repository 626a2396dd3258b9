//! Day-off store: overlap detection, exclusive create and scoped listing.

mod common;

use std::sync::Arc;

use chrono::NaiveDate;

use leave_scheduler::domain::{DayOffDraft, DayOffScope, DayOffType, Department};
use leave_scheduler::infra::{DayOffRepository, DayOffStore, EmployeeRepository, EmployeeStore};
use leave_scheduler::types::{ListParams, PagePolicy};

use common::{at, new_employee, setup_db, SharedDb};

// =============================================================================
// Fixtures
// =============================================================================

/// Store with employees 1 and 2
async fn store() -> DayOffStore {
    let db = setup_db().await;
    let employees = EmployeeStore::new(db.clone());
    employees.create(&new_employee(1, Department::Design)).await.unwrap();
    employees.create(&new_employee(2, Department::Sales)).await.unwrap();
    DayOffStore::new(db)
}

fn draft(employee_id: i32, start: (u32, u32), end: (u32, u32)) -> DayOffDraft {
    DayOffDraft {
        employee_id,
        day_off_type: DayOffType::Pto,
        reason: "time off".to_string(),
        start_time: at(start.0, start.1),
        end_time: at(end.0, end.1),
    }
}

// =============================================================================
// Overlap
// =============================================================================

#[tokio::test]
async fn test_exclusive_create_assigns_id() {
    let store = store().await;

    let record = store
        .create_exclusive(&draft(1, (6, 9), (7, 18)))
        .await
        .unwrap()
        .expect("no conflict");

    assert!(record.id > 0);
    assert!(record.is_active());
    assert_eq!(record.start_time, at(6, 9));
    assert_eq!(store.find_active_by_id(record.id).await.unwrap(), Some(record));
}

#[tokio::test]
async fn test_overlap_is_closed_interval() {
    let store = store().await;
    store.create_exclusive(&draft(1, (6, 9), (7, 18))).await.unwrap();

    // Containment, partial overlap and a touching endpoint all conflict
    assert!(store.exists_overlapping(1, at(6, 12), at(6, 13)).await.unwrap());
    assert!(store.exists_overlapping(1, at(5, 9), at(6, 10)).await.unwrap());
    assert!(store.exists_overlapping(1, at(7, 18), at(8, 9)).await.unwrap());
    assert!(store.exists_overlapping(1, at(5, 9), at(6, 9)).await.unwrap());

    assert!(!store.exists_overlapping(1, at(7, 19), at(8, 9)).await.unwrap());
    assert!(!store.exists_overlapping(1, at(1, 9), at(6, 8)).await.unwrap());
}

#[tokio::test]
async fn test_overlap_is_per_employee() {
    let store = store().await;
    store.create_exclusive(&draft(1, (6, 9), (7, 18))).await.unwrap();

    assert!(!store.exists_overlapping(2, at(6, 9), at(7, 18)).await.unwrap());
    assert!(store
        .create_exclusive(&draft(2, (6, 9), (7, 18)))
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_exclusive_create_refuses_overlap() {
    let store = store().await;
    store.create_exclusive(&draft(1, (6, 9), (7, 18))).await.unwrap();

    let second = store.create_exclusive(&draft(1, (7, 18), (9, 9))).await.unwrap();
    assert!(second.is_none());

    let (_, total) = store.list(&DayOffScope::employee(1), &Default::default()).await.unwrap();
    assert_eq!(total, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_parallel_exclusive_creates_admit_exactly_one() {
    let shared = SharedDb::create("exclusive-create").await;
    EmployeeStore::new(shared.db.clone())
        .create(&new_employee(1, Department::Design))
        .await
        .unwrap();
    let store = Arc::new(DayOffStore::new(shared.db.clone()));

    let first = tokio::spawn({
        let store = store.clone();
        async move { store.create_exclusive(&draft(1, (6, 9), (8, 18))).await }
    });
    let second = tokio::spawn({
        let store = store.clone();
        async move { store.create_exclusive(&draft(1, (7, 9), (9, 18))).await }
    });

    let outcomes = [first.await.unwrap().unwrap(), second.await.unwrap().unwrap()];

    assert_eq!(outcomes.iter().filter(|o| o.is_some()).count(), 1);
    let (_, total) = store.list(&DayOffScope::employee(1), &Default::default()).await.unwrap();
    assert_eq!(total, 1);
}

#[tokio::test]
async fn test_cancelled_record_frees_interval() {
    let store = store().await;
    let mut record = store
        .create_exclusive(&draft(1, (6, 9), (7, 18)))
        .await
        .unwrap()
        .unwrap();

    record.cancel("plans changed");
    store.update(&record).await.unwrap();

    assert!(store.find_active_by_id(record.id).await.unwrap().is_none());
    assert!(!store.exists_overlapping(1, at(6, 9), at(7, 18)).await.unwrap());
    assert!(store
        .create_exclusive(&draft(1, (6, 9), (7, 18)))
        .await
        .unwrap()
        .is_some());
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_default_order_is_latest_start_first() {
    let store = store().await;
    for day in [3, 9, 6] {
        store.create_exclusive(&draft(1, (day, 9), (day, 17))).await.unwrap();
    }

    let (records, total) = store.list(&DayOffScope::default(), &Default::default()).await.unwrap();
    let starts: Vec<_> = records.iter().map(|r| r.start_time).collect();

    assert_eq!(total, 3);
    assert_eq!(starts, vec![at(9, 9), at(6, 9), at(3, 9)]);
}

#[tokio::test]
async fn test_scope_by_employee_and_start_dates() {
    let store = store().await;
    for day in [3, 6, 9] {
        store.create_exclusive(&draft(1, (day, 9), (day, 17))).await.unwrap();
    }
    store.create_exclusive(&draft(2, (6, 9), (6, 17))).await.unwrap();

    let (records, total) = store.list(&DayOffScope::employee(2), &Default::default()).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(records[0].employee_id, 2);

    let scope = DayOffScope::employee(1).starting_between(
        NaiveDate::from_ymd_opt(2024, 5, 4),
        NaiveDate::from_ymd_opt(2024, 5, 9),
    );
    let (records, _) = store.list(&scope, &Default::default()).await.unwrap();
    let starts: Vec<_> = records.iter().map(|r| r.start_time).collect();
    assert_eq!(starts, vec![at(9, 9), at(6, 9)]);
}

#[tokio::test]
async fn test_type_filter_and_sort() {
    let store = store().await;
    store.create_exclusive(&draft(1, (3, 9), (3, 17))).await.unwrap();
    store
        .create_exclusive(&DayOffDraft {
            day_off_type: DayOffType::SickLeave,
            ..draft(1, (6, 9), (6, 17))
        })
        .await
        .unwrap();
    store.create_exclusive(&draft(1, (9, 9), (9, 17))).await.unwrap();

    let query = ListParams::default()
        .filter("dayOffType", "PTO")
        .sort("startTime", "asc")
        .normalize(&PagePolicy::default());
    let (records, total) = store.list(&DayOffScope::default(), &query).await.unwrap();

    assert_eq!(total, 2);
    assert!(records.iter().all(|r| r.day_off_type == DayOffType::Pto));
    assert_eq!(records[0].start_time, at(3, 9));
}

#[tokio::test]
async fn test_cancelled_records_are_not_listed() {
    let store = store().await;
    let mut record = store
        .create_exclusive(&draft(1, (6, 9), (7, 18)))
        .await
        .unwrap()
        .unwrap();
    store.create_exclusive(&draft(1, (9, 9), (9, 18))).await.unwrap();

    record.cancel("sick kid");
    store.update(&record).await.unwrap();

    let (records, total) = store.list(&DayOffScope::employee(1), &Default::default()).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(records[0].start_time, at(9, 9));
}
