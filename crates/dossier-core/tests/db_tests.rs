use dossier_core::{Database, ProcurementType, RecordStatus, TrackerError};
use jiff::{civil::date, Timestamp};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn at(day: i8) -> Option<Timestamp> {
    Some(
        date(2024, 1, day)
            .at(9, 0, 0, 0)
            .in_tz("UTC")
            .expect("valid zoned time")
            .timestamp(),
    )
}

#[test]
fn test_database_initialization() {
    let (temp_file, _db) = create_test_db();
    assert!(temp_file.path().exists());
}

#[test]
fn test_reopening_keeps_data() {
    let (temp_file, mut db) = create_test_db();
    let folder = db
        .create_folder("PR 2024 Q1", Some("Drawer 1"), None, Some("Box B"))
        .expect("Failed to create folder");
    drop(db);

    let db = Database::new(temp_file.path()).expect("Failed to reopen database");
    let reloaded = db
        .get_folder(folder.id)
        .expect("Failed to get folder")
        .expect("Folder should exist");
    assert_eq!(reloaded.name, "PR 2024 Q1");
    assert_eq!(reloaded.box_label.as_deref(), Some("Box B"));
}

#[test]
fn test_create_and_get_record() {
    let (_temp_file, mut db) = create_test_db();
    let folder = db.create_folder("F", None, None, None).unwrap();

    let record = db
        .create_record(
            folder.id,
            "Office supplies",
            Some("PR-2024-0113"),
            ProcurementType::Svp,
            at(2),
        )
        .expect("Failed to create record");

    assert!(record.id > 0);
    assert_eq!(record.status, RecordStatus::Archived);
    assert_eq!(record.stack_number, Some(1));
    assert_eq!(record.date_added, at(2).unwrap());

    let fetched = db
        .get_record(record.id)
        .expect("Failed to get record")
        .expect("Record should exist");
    assert_eq!(fetched, record);

    let folder = db.get_folder(folder.id).unwrap().unwrap();
    assert_eq!(folder.record_count, 1);
}

#[test]
fn test_get_missing_record() {
    let (_temp_file, db) = create_test_db();
    assert!(db.get_record(42).unwrap().is_none());
}

#[test]
fn test_milestones_round_trip_through_store() {
    let (_temp_file, mut db) = create_test_db();
    let folder = db.create_folder("F", None, None, None).unwrap();
    let record = db
        .create_record(folder.id, "Road repair", None, ProcurementType::RegularBidding, at(1))
        .unwrap();

    db.set_milestone(record.id, "receivedPrDate", date(2024, 2, 1))
        .unwrap();
    let updated = db
        .set_milestone(record.id, "receivedPrDate", date(2024, 2, 3))
        .unwrap();

    assert_eq!(updated.milestones.len(), 1);
    assert_eq!(
        updated.milestones.get("receivedPrDate"),
        Some(date(2024, 2, 3))
    );
}

#[test]
fn test_set_milestone_missing_record() {
    let (_temp_file, mut db) = create_test_db();
    let result = db.set_milestone(7, "receivedPrDate", date(2024, 2, 1));
    assert!(matches!(result, Err(TrackerError::RecordNotFound { id: 7 })));
}

#[test]
fn test_borrowed_record_leaves_stack_until_returned() {
    let (_temp_file, mut db) = create_test_db();
    let folder = db.create_folder("F", None, None, None).unwrap();
    let a = db.create_record(folder.id, "A", None, ProcurementType::Svp, at(1)).unwrap();
    let b = db.create_record(folder.id, "B", None, ProcurementType::Svp, at(2)).unwrap();
    let c = db.create_record(folder.id, "C", None, ProcurementType::Svp, at(3)).unwrap();

    db.borrow_record(a.id).unwrap();
    assert_eq!(db.get_record(b.id).unwrap().unwrap().stack_number, Some(1));
    assert_eq!(db.get_record(c.id).unwrap().unwrap().stack_number, Some(2));

    let returned = db.return_record(a.id).unwrap();
    assert_eq!(returned.status, RecordStatus::Archived);
    // Returned without a stack number, so it sorts by date added: first.
    assert_eq!(returned.stack_number, Some(1));
    assert_eq!(db.get_record(c.id).unwrap().unwrap().stack_number, Some(3));

    assert!(matches!(
        db.return_record(a.id),
        Err(TrackerError::InvalidInput { .. })
    ));
}

#[test]
fn test_relocate_writes_only_order_key_of_target() {
    let (_temp_file, mut db) = create_test_db();
    let folder = db.create_folder("F", None, None, None).unwrap();
    let ids: Vec<u64> = (1..=4)
        .map(|day| {
            db.create_record(folder.id, &format!("R{day}"), None, ProcurementType::Svp, at(day))
                .unwrap()
                .id
        })
        .collect();

    let moved = db
        .relocate_record(ids[3], Some(2))
        .unwrap()
        .expect("record relocated");
    assert_eq!(moved.stack_number, Some(2));

    let key = moved.stack_order_date.expect("order key written");
    let first = at(1).unwrap().as_millisecond() as f64;
    let second = at(2).unwrap().as_millisecond() as f64;
    assert!(key > first && key < second);

    for id in &ids[..3] {
        assert_eq!(db.get_record(*id).unwrap().unwrap().stack_order_date, None);
    }

    let (_, stack) = db.folder_stack(folder.id).unwrap();
    let order: Vec<u64> = stack.iter().map(|r| r.id).collect();
    assert_eq!(order, vec![ids[0], ids[3], ids[1], ids[2]]);
}

#[test]
fn test_repeated_relocation_stays_dense() {
    let (_temp_file, mut db) = create_test_db();
    let folder = db.create_folder("F", None, None, None).unwrap();
    let ids: Vec<u64> = (1..=5)
        .map(|day| {
            db.create_record(folder.id, &format!("R{day}"), None, ProcurementType::Svp, at(day))
                .unwrap()
                .id
        })
        .collect();

    for (id, target) in [(ids[4], 1), (ids[0], 5), (ids[2], 2), (ids[4], 99)] {
        db.relocate_record(id, Some(target)).unwrap();
    }

    let (_, stack) = db.folder_stack(folder.id).unwrap();
    let numbers: Vec<Option<u32>> = stack.iter().map(|r| r.stack_number).collect();
    assert_eq!(numbers, vec![Some(1), Some(2), Some(3), Some(4), Some(5)]);
    assert_eq!(stack.last().map(|r| r.id), Some(ids[4]));
}

#[test]
fn test_move_record_clears_order_key() {
    let (_temp_file, mut db) = create_test_db();
    let first = db.create_folder("First", None, None, None).unwrap();
    let second = db.create_folder("Second", None, None, None).unwrap();
    let a = db.create_record(first.id, "A", None, ProcurementType::Svp, at(1)).unwrap();
    db.create_record(first.id, "B", None, ProcurementType::Svp, at(2)).unwrap();
    db.relocate_record(a.id, Some(2)).unwrap();

    let moved = db.move_record(a.id, second.id).unwrap();
    assert_eq!(moved.folder_id, second.id);
    assert_eq!(moved.stack_order_date, None);
    assert_eq!(moved.stack_number, Some(1));

    assert!(matches!(
        db.move_record(a.id, 999),
        Err(TrackerError::FolderNotFound { id: 999 })
    ));
}

#[test]
fn test_delete_record_removes_milestones() {
    let (_temp_file, mut db) = create_test_db();
    let folder = db.create_folder("F", None, None, None).unwrap();
    let record = db.create_record(folder.id, "A", None, ProcurementType::Svp, at(1)).unwrap();
    db.set_milestone(record.id, "receivedPrDate", date(2024, 2, 1)).unwrap();

    db.delete_record(record.id).unwrap();
    assert!(db.get_record(record.id).unwrap().is_none());
    assert!(matches!(
        db.delete_record(record.id),
        Err(TrackerError::RecordNotFound { .. })
    ));

    // The folder is empty again and can go.
    db.delete_folder(folder.id).unwrap();
    assert!(db.get_folder(folder.id).unwrap().is_none());
}

#[test]
fn test_dashboard_summary_over_store() {
    let (_temp_file, mut db) = create_test_db();
    let folder = db.create_folder("F", None, None, None).unwrap();
    let a = db.create_record(folder.id, "A", None, ProcurementType::Svp, at(1)).unwrap();
    db.create_record(folder.id, "B", None, ProcurementType::RegularBidding, at(2)).unwrap();
    db.borrow_record(a.id).unwrap();

    let summary = db.dashboard_summary().unwrap();
    assert_eq!(summary.total_records, 2);
    assert_eq!(summary.borrowed, 1);
    assert_eq!(summary.count_for(ProcurementType::RegularBidding), 1);
}
