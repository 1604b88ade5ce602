//! Checkout, order history and export against both store backends.

use boxoffice::store::{EventStore, MemoryStore, SqliteStore};
use boxoffice::{BoxOffice, BoxOfficeConfig, BoxOfficeError, EventDraft, OrderNumber};
use chrono::{NaiveDate, NaiveDateTime};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn at(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

#[test]
fn checkout_deducts_seats_and_records_order() -> anyhow::Result<()> {
    init_tracing();
    let mut office = BoxOffice::open(SqliteStore::open_memory()?, BoxOfficeConfig::default())?;
    let a = office.add_event(EventDraft::new("A", "Hall", "Fri", 20.0, 5))?;
    let b = office.add_event(EventDraft::new("B", "Club", "Sat", 10.0, 1))?;

    office.add_to_cart(a, 2)?;
    office.add_to_cart(b, 1)?;
    assert!(office.validate_cart());
    assert_eq!(office.cart_total(), 50.0);

    let order = office.checkout_at(at(12))?;
    assert_eq!(order.number, OrderNumber(1));
    assert_eq!(order.total, 50.0);
    assert_eq!(order.lines.len(), 2);
    assert_eq!(order.seat_count(), 3);

    assert_eq!(office.event(a).unwrap().remaining_seats, 3);
    assert_eq!(office.event(b).unwrap().remaining_seats, 0);
    assert!(office.cart().is_empty());
    assert_eq!(office.next_order_number(), OrderNumber(2));

    // Store agrees with memory.
    let stored = office.store().all_events()?;
    assert_eq!(stored.iter().find(|e| e.id == a).unwrap().remaining_seats, 3);
    assert_eq!(stored.iter().find(|e| e.id == b).unwrap().remaining_seats, 0);

    let orders = office.orders()?;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].number, OrderNumber(1));
    assert_eq!(orders[0].timestamp, at(12));
    Ok(())
}

#[test]
fn checkout_rejects_oversold_cart_without_changes() -> anyhow::Result<()> {
    let mut office = BoxOffice::open(SqliteStore::open_memory()?, BoxOfficeConfig::default())?;
    let c = office.add_event(EventDraft::new("C", "Hall", "Sun", 15.0, 2))?;
    office.add_to_cart(c, 3)?;
    assert!(!office.validate_cart());

    let err = office.checkout_at(at(12)).unwrap_err();
    assert!(matches!(
        err,
        BoxOfficeError::InsufficientAvailability {
            requested: 3,
            remaining: 2,
            ..
        }
    ));

    assert_eq!(office.event(c).unwrap().remaining_seats, 2);
    assert_eq!(office.cart().quantity_of(c), 3);
    assert!(office.orders()?.is_empty());
    assert_eq!(office.next_order_number(), OrderNumber(1));
    Ok(())
}

#[test]
fn failed_persistence_rolls_back_everything() -> anyhow::Result<()> {
    init_tracing();
    let mut office = BoxOffice::open(MemoryStore::new(), BoxOfficeConfig::default())?;
    let a = office.add_event(EventDraft::new("A", "Hall", "Fri", 20.0, 5))?;
    office.add_to_cart(a, 2)?;

    office.store().set_fail_writes(true)?;
    assert!(matches!(
        office.checkout_at(at(9)),
        Err(BoxOfficeError::Persistence(_))
    ));
    office.store().set_fail_writes(false)?;

    assert_eq!(office.event(a).unwrap().remaining_seats, 5);
    assert_eq!(office.store().all_events()?[0].remaining_seats, 5);
    assert!(office.orders()?.is_empty());
    assert_eq!(office.cart().quantity_of(a), 2);

    // The same cart goes through once the store recovers, as order 1.
    let order = office.checkout_at(at(10))?;
    assert_eq!(order.number, OrderNumber(1));
    Ok(())
}

#[test]
fn order_numbers_resume_after_restart() -> anyhow::Result<()> {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let db = dir.path().join("application.db");

    {
        let mut office = BoxOffice::open(SqliteStore::open(&db)?, BoxOfficeConfig::default())?;
        let a = office.add_event(EventDraft::new("A", "Hall", "Fri", 20.0, 50))?;
        for hour in 1..=7 {
            office.add_to_cart(a, 1)?;
            office.checkout_at(at(hour))?;
        }
        assert_eq!(office.next_order_number(), OrderNumber(8));
    }

    let mut office = BoxOffice::open(SqliteStore::open(&db)?, BoxOfficeConfig::default())?;
    assert_eq!(office.next_order_number(), OrderNumber(8));

    let a = office.list_events(false)[0].id;
    assert_eq!(office.event(a).unwrap().remaining_seats, 43);
    office.add_to_cart(a, 1)?;
    assert_eq!(office.checkout_at(at(8))?.number, OrderNumber(8));
    Ok(())
}

#[test]
fn history_is_newest_first_and_survives_event_edits() -> anyhow::Result<()> {
    let mut office = BoxOffice::open(SqliteStore::open_memory()?, BoxOfficeConfig::default())?;
    let a = office.add_event(EventDraft::new("A", "Hall", "Fri", 20.0, 10))?;
    let b = office.add_event(EventDraft::new("B", "Club", "Sat", 10.0, 10))?;

    office.add_to_cart(a, 1)?;
    office.checkout_at(at(1))?;
    office.add_to_cart(b, 2)?;
    office.checkout_at(at(2))?;

    let mut edited = office.event(a).unwrap().clone();
    edited.price = 99.0;
    office.edit_event(edited)?;

    let orders = office.orders()?;
    let numbers: Vec<u32> = orders.iter().map(|o| o.number.get()).collect();
    assert_eq!(numbers, vec![2, 1]);
    // Totals are frozen at checkout time.
    assert_eq!(orders[1].total, 20.0);
    assert_eq!(orders[0].details(), "B x2");
    Ok(())
}

#[test]
fn export_writes_report() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut office = BoxOffice::open(SqliteStore::open_memory()?, BoxOfficeConfig::default())?;

    let empty = dir.path().join("empty.txt");
    assert_eq!(office.export_orders(&empty)?, 0);
    assert_eq!(std::fs::read_to_string(&empty)?, "");

    let a = office.add_event(EventDraft::new("A", "Hall", "Fri", 20.0, 10))?;
    office.add_to_cart(a, 2)?;
    office.checkout_at(at(14))?;

    let path = dir.path().join("orders.txt");
    assert_eq!(office.export_orders(&path)?, 1);
    let report = std::fs::read_to_string(&path)?;
    assert!(report.contains("0001"));
    assert!(report.contains("2024-03-01 14:00:00"));
    assert!(report.contains("$40.00"));
    Ok(())
}

#[test]
fn export_to_missing_directory_fails() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let office = BoxOffice::open(MemoryStore::new(), BoxOfficeConfig::default())?;
    let err = office
        .export_orders(dir.path().join("missing").join("orders.txt"))
        .unwrap_err();
    assert!(matches!(err, BoxOfficeError::Export { .. }));
    Ok(())
}
