//! Tests for the tracker module.

use tempfile::TempDir;

use super::*;
use crate::{
    models::{ProcurementRecord, ProcurementType, RecordStatus},
    params::{
        ClearMilestone, CreateFolder, CreateRecord, DeleteFolder, Id, ListFolders, ListRecords,
        MoveRecord, RelocateRecord, SetMilestone,
    },
};

/// Helper function to create a test tracker
async fn create_test_tracker() -> (TempDir, Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}

async fn create_folder(tracker: &Tracker, name: &str) -> u64 {
    tracker
        .create_folder(&CreateFolder {
            name: name.to_string(),
            drawer: Some("Drawer 1".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to create folder")
        .id
}

async fn create_record(tracker: &Tracker, folder_id: u64, title: &str, added: &str) -> u64 {
    tracker
        .create_record(&CreateRecord {
            folder_id,
            title: title.to_string(),
            date_added: Some(added.to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to create record")
        .id
}

async fn set(tracker: &Tracker, record_id: u64, step_key: &str) -> crate::Result<ProcurementRecord> {
    tracker
        .set_milestone(&SetMilestone {
            record_id,
            step_key: step_key.to_string(),
            date: Some("2024-05-01".to_string()),
        })
        .await
}

async fn stack_ids(tracker: &Tracker, folder_id: u64) -> Vec<(u64, Option<u32>)> {
    tracker
        .folder_stack(&Id { id: folder_id })
        .await
        .expect("Failed to load folder stack")
        .records
        .iter()
        .map(|r| (r.id, r.stack_number))
        .collect()
}

#[tokio::test]
async fn test_new_records_are_appended_to_stack() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let folder = create_folder(&tracker, "PR 2024 Q1").await;

    let a = create_record(&tracker, folder, "A", "2024-01-01T00:00:00Z").await;
    let b = create_record(&tracker, folder, "B", "2024-01-02T00:00:00Z").await;
    let c = create_record(&tracker, folder, "C", "2024-01-03T00:00:00Z").await;

    assert_eq!(
        stack_ids(&tracker, folder).await,
        vec![(a, Some(1)), (b, Some(2)), (c, Some(3))]
    );
}

#[tokio::test]
async fn test_create_record_in_missing_folder() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let result = tracker
        .create_record(&CreateRecord {
            folder_id: 99,
            title: "Orphan".to_string(),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(TrackerError::FolderNotFound { id: 99 })));
}

#[tokio::test]
async fn test_borrow_and_return_keep_stack_dense() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let folder = create_folder(&tracker, "PR 2024 Q1").await;

    let a = create_record(&tracker, folder, "A", "2024-01-01T00:00:00Z").await;
    let b = create_record(&tracker, folder, "B", "2024-01-02T00:00:00Z").await;
    let c = create_record(&tracker, folder, "C", "2024-01-03T00:00:00Z").await;

    let borrowed = tracker.borrow_record(&Id { id: b }).await.unwrap();
    assert_eq!(borrowed.status, RecordStatus::Active);
    assert_eq!(borrowed.stack_number, None);
    assert_eq!(
        stack_ids(&tracker, folder).await,
        vec![(a, Some(1)), (c, Some(2)), (b, None)]
    );

    // Borrowing twice is refused
    let again = tracker.borrow_record(&Id { id: b }).await;
    assert!(matches!(again, Err(TrackerError::InvalidInput { .. })));

    let returned = tracker.return_record(&Id { id: b }).await.unwrap();
    assert_eq!(returned.status, RecordStatus::Archived);
    let mut ranks: Vec<u32> = stack_ids(&tracker, folder)
        .await
        .into_iter()
        .filter_map(|(_, n)| n)
        .collect();
    ranks.sort_unstable();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_relocate_to_top() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let folder = create_folder(&tracker, "PR 2024 Q1").await;

    let a = create_record(&tracker, folder, "A", "2024-01-01T00:00:00Z").await;
    let b = create_record(&tracker, folder, "B", "2024-01-02T00:00:00Z").await;
    let c = create_record(&tracker, folder, "C", "2024-01-03T00:00:00Z").await;

    let moved = tracker
        .relocate_record(&RelocateRecord {
            id: c,
            target_stack: Some(1),
        })
        .await
        .unwrap()
        .expect("record relocated");

    assert_eq!(moved.stack_number, Some(1));
    assert!(moved.stack_order_date.is_some());
    assert_eq!(
        stack_ids(&tracker, folder).await,
        vec![(c, Some(1)), (a, Some(2)), (b, Some(3))]
    );
}

#[tokio::test]
async fn test_relocate_without_target_is_noop() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let folder = create_folder(&tracker, "PR 2024 Q1").await;
    let a = create_record(&tracker, folder, "A", "2024-01-01T00:00:00Z").await;

    let result = tracker
        .relocate_record(&RelocateRecord {
            id: a,
            target_stack: None,
        })
        .await
        .unwrap();
    assert!(result.is_none());

    let record = tracker.show_record(&Id { id: a }).await.unwrap();
    assert_eq!(record.stack_order_date, None);
}

#[tokio::test]
async fn test_relocate_borrowed_record_is_refused() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let folder = create_folder(&tracker, "PR 2024 Q1").await;
    let a = create_record(&tracker, folder, "A", "2024-01-01T00:00:00Z").await;
    tracker.borrow_record(&Id { id: a }).await.unwrap();

    let result = tracker
        .relocate_record(&RelocateRecord {
            id: a,
            target_stack: Some(1),
        })
        .await;
    assert!(matches!(result, Err(TrackerError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_move_record_between_folders() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let first = create_folder(&tracker, "First").await;
    let second = create_folder(&tracker, "Second").await;

    let a = create_record(&tracker, first, "A", "2024-01-01T00:00:00Z").await;
    let b = create_record(&tracker, first, "B", "2024-01-02T00:00:00Z").await;
    let c = create_record(&tracker, second, "C", "2024-01-03T00:00:00Z").await;

    let moved = tracker
        .move_record(&MoveRecord {
            id: a,
            folder_id: second,
        })
        .await
        .unwrap();

    assert_eq!(moved.folder_id, second);
    assert_eq!(stack_ids(&tracker, first).await, vec![(b, Some(1))]);
    assert_eq!(
        stack_ids(&tracker, second).await,
        vec![(c, Some(1)), (a, Some(2))]
    );
}

#[tokio::test]
async fn test_delete_record_closes_gap() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let folder = create_folder(&tracker, "PR 2024 Q1").await;

    let a = create_record(&tracker, folder, "A", "2024-01-01T00:00:00Z").await;
    let b = create_record(&tracker, folder, "B", "2024-01-02T00:00:00Z").await;
    let c = create_record(&tracker, folder, "C", "2024-01-03T00:00:00Z").await;

    let deleted = tracker.delete_record(&Id { id: b }).await.unwrap();
    assert_eq!(deleted.title, "B");
    assert_eq!(
        stack_ids(&tracker, folder).await,
        vec![(a, Some(1)), (c, Some(2))]
    );
}

#[tokio::test]
async fn test_set_milestone_in_order() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let folder = create_folder(&tracker, "PR 2024 Q1").await;
    let id = create_record(&tracker, folder, "Office supplies", "2024-01-01T00:00:00Z").await;

    set(&tracker, id, "receivedPrDate").await.unwrap();
    let record = set(&tracker, id, "prDeliberatedDate").await.unwrap();

    assert_eq!(record.completion_percentage(), 29);
    assert_eq!(
        record.next_required_step().map(|s| s.key),
        Some("publishedDate")
    );
}

#[tokio::test]
async fn test_set_milestone_locked_step() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let folder = create_folder(&tracker, "PR 2024 Q1").await;
    let id = create_record(&tracker, folder, "Office supplies", "2024-01-01T00:00:00Z").await;

    set(&tracker, id, "receivedPrDate").await.unwrap();
    match set(&tracker, id, "publishedDate").await {
        Err(TrackerError::StepLocked { step, missing }) => {
            assert_eq!(step, "publishedDate");
            assert_eq!(missing, vec!["prDeliberatedDate".to_string()]);
        }
        other => panic!("Expected StepLocked, got {other:?}"),
    }
}

#[tokio::test]
async fn test_set_milestone_unknown_key_is_rejected() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let folder = create_folder(&tracker, "PR 2024 Q1").await;
    let id = create_record(&tracker, folder, "Office supplies", "2024-01-01T00:00:00Z").await;

    let result = set(&tracker, id, "lunchDate").await;
    assert!(matches!(result, Err(TrackerError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_set_bidding_step_on_svp_record_is_allowed() {
    // The step is unknown to the SVP workflow, so nothing gates it.
    let (_temp_dir, tracker) = create_test_tracker().await;
    let folder = create_folder(&tracker, "PR 2024 Q1").await;
    let id = create_record(&tracker, folder, "Office supplies", "2024-01-01T00:00:00Z").await;

    let record = set(&tracker, id, "preBidConferenceDate").await.unwrap();
    assert!(record.milestones.is_set("preBidConferenceDate"));
    assert_eq!(record.completion_percentage(), 0);
}

#[tokio::test]
async fn test_clear_milestone_cascades() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let folder = create_folder(&tracker, "PR 2024 Q1").await;
    let id = create_record(&tracker, folder, "Office supplies", "2024-01-01T00:00:00Z").await;

    for key in ["receivedPrDate", "prDeliberatedDate", "publishedDate", "rfqOpeningDate"] {
        set(&tracker, id, key).await.unwrap();
    }

    let (record, cleared) = tracker
        .clear_milestone(&ClearMilestone {
            record_id: id,
            step_key: "prDeliberatedDate".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        cleared,
        vec!["prDeliberatedDate", "publishedDate", "rfqOpeningDate"]
    );
    assert_eq!(record.milestones.len(), 1);
    assert!(record.milestones.is_set("receivedPrDate"));
}

#[tokio::test]
async fn test_next_step_for_regular_bidding() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let folder = create_folder(&tracker, "PR 2024 Q1").await;
    let record = tracker
        .create_record(&CreateRecord {
            folder_id: folder,
            title: "Road repair".to_string(),
            procurement_type: Some("regular_bidding".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(record.procurement_type, ProcurementType::RegularBidding);

    set(&tracker, record.id, "receivedPrDate").await.unwrap();
    set(&tracker, record.id, "prDeliberatedDate").await.unwrap();

    let (_, next) = tracker.next_step(&Id { id: record.id }).await.unwrap();
    assert_eq!(next.map(|s| s.key), Some("preProcConferenceDate"));
}

#[tokio::test]
async fn test_list_records_filters() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let first = create_folder(&tracker, "First").await;
    let second = create_folder(&tracker, "Second").await;

    let a = create_record(&tracker, first, "Office supplies", "2024-01-01T00:00:00Z").await;
    create_record(&tracker, first, "Road repair", "2024-01-02T00:00:00Z").await;
    create_record(&tracker, second, "Office chairs", "2024-01-03T00:00:00Z").await;
    tracker.borrow_record(&Id { id: a }).await.unwrap();

    let office = tracker
        .list_records_summary(&ListRecords {
            search: Some("office".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(office.len(), 2);

    let borrowed = tracker
        .list_records_summary(&ListRecords {
            status: Some("borrowed".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(borrowed.len(), 1);
    assert_eq!(borrowed.iter().next().map(|r| r.id), Some(a));

    let in_first = tracker
        .list_records_summary(&ListRecords {
            folder_id: Some(first),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(in_first.len(), 2);
}

#[tokio::test]
async fn test_delete_folder_requires_confirmation() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let folder = create_folder(&tracker, "Empty").await;

    let unconfirmed = tracker
        .delete_folder(&DeleteFolder {
            id: folder,
            confirmed: false,
        })
        .await;
    match unconfirmed {
        Err(TrackerError::InvalidInput { field, .. }) => assert_eq!(field, "confirmed"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }

    let deleted = tracker
        .delete_folder(&DeleteFolder {
            id: folder,
            confirmed: true,
        })
        .await
        .unwrap();
    assert_eq!(deleted.name, "Empty");
    assert!(tracker.get_folder(&Id { id: folder }).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_folder_with_records_is_refused() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let folder = create_folder(&tracker, "Busy").await;
    create_record(&tracker, folder, "A", "2024-01-01T00:00:00Z").await;

    let result = tracker
        .delete_folder(&DeleteFolder {
            id: folder,
            confirmed: true,
        })
        .await;
    assert!(matches!(result, Err(TrackerError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_list_folders_by_location() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    create_folder(&tracker, "In drawer 1").await;
    tracker
        .create_folder(&CreateFolder {
            name: "In drawer 2".to_string(),
            drawer: Some("Drawer 2".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let folders = tracker
        .list_folders_summary(&ListFolders {
            drawer: Some("Drawer 2".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders.iter().next().map(|f| f.name.as_str()), Some("In drawer 2"));
}

#[tokio::test]
async fn test_dashboard_counts() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let folder = create_folder(&tracker, "PR 2024 Q1").await;
    let a = create_record(&tracker, folder, "A", "2024-01-01T00:00:00Z").await;
    create_record(&tracker, folder, "B", "2024-01-02T00:00:00Z").await;
    tracker.borrow_record(&Id { id: a }).await.unwrap();

    let summary = tracker.dashboard().await.unwrap();
    assert_eq!(summary.total_records, 2);
    assert_eq!(summary.archived, 1);
    assert_eq!(summary.borrowed, 1);
    assert_eq!(summary.count_for(ProcurementType::Svp), 2);
}
