use dossier_core::{params::CreateFolder, Tracker, TrackerBuilder};
use tempfile::TempDir;

/// Helper function to create a test tracker
pub async fn create_test_tracker() -> (TempDir, Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}

/// Creates a folder in drawer "Drawer 1" and returns its ID
pub async fn create_test_folder(tracker: &Tracker, name: &str) -> u64 {
    tracker
        .create_folder(&CreateFolder {
            name: name.to_string(),
            drawer: Some("Drawer 1".to_string()),
            cabinet: Some("Cabinet A".to_string()),
            box_label: None,
        })
        .await
        .expect("Failed to create folder")
        .id
}
