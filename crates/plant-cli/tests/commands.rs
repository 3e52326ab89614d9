use std::fs;
use std::path::Path;

use plant_cli::commands::{
    DEFAULT_CONFIG_FILE, open_store, run_backups, run_check, run_export, run_import, run_info,
    run_remove,
};
use plant_persistence::PersistenceError;
use tempfile::tempdir;

const PLANT1: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<model version="0.0.2" name="Plant1">
  <point name="P1" xPosition="0" yPosition="0" zPosition="0" vehicleOrientationAngle="0"/>
  <point name="P2" xPosition="1000" yPosition="0" zPosition="0" vehicleOrientationAngle="0"/>
  <path name="P1-P2" sourcePoint="P1" destinationPoint="P2" length="1000"/>
  <visualLayout name="VLayout-1" scaleX="50" scaleY="50">
    <modelLayoutElement name="Ghost" layer="0" visualizedObjectName="Nowhere"/>
  </visualLayout>
</model>
"#;

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn import_check_export_cycle() {
    let dir = tempdir().unwrap();
    let store = open_store(Some(dir.path()), None).unwrap();
    let source = write_file(dir.path(), "plant1.xml", PLANT1);

    let check = run_check(&store, &source).unwrap();
    assert!(!check.has_errors());
    assert_eq!(check.report.diagnostics.len(), 1);
    assert!(!store.has_saved_model());

    let import = run_import(&store, &source).unwrap();
    assert_eq!(import.model_name, "Plant1");
    assert_eq!(import.report.summary.points, 2);

    let info = run_info(&store).unwrap();
    assert_eq!(info.model_name.as_deref(), Some("Plant1"));
    assert_eq!(info.digest.as_ref().map(String::len), Some(64));
    assert_eq!(info.report.summary.paths, 1);
    assert_eq!(info.backups, 0);

    let exported = dir.path().join("out.xml");
    let summary = run_export(&store, &exported).unwrap();
    assert_eq!(summary.total(), 4);
    let content = fs::read_to_string(&exported).unwrap();
    assert!(content.contains(r#"name="P1-P2""#));
    assert!(!content.contains("Ghost"));
}

#[test]
fn check_reports_structural_errors_without_failing() {
    let dir = tempdir().unwrap();
    let store = open_store(Some(dir.path()), None).unwrap();
    let broken = write_file(
        dir.path(),
        "broken.xml",
        r#"<model version="0.0.2" name="Plant1"><point name="P1"/><point name="P1"/></model>"#,
    );

    let check = run_check(&store, &broken).unwrap();
    assert!(check.has_errors());
    assert!(matches!(check.error, Some(PersistenceError::DuplicateName { .. })));
    assert!(check.model_name.is_none());
}

#[test]
fn check_fails_for_missing_file() {
    let dir = tempdir().unwrap();
    let store = open_store(Some(dir.path()), None).unwrap();
    assert!(run_check(&store, &dir.path().join("absent.xml")).is_err());
}

#[test]
fn rejected_import_keeps_current_snapshot() {
    let dir = tempdir().unwrap();
    let store = open_store(Some(dir.path()), None).unwrap();
    run_import(&store, &write_file(dir.path(), "plant1.xml", PLANT1)).unwrap();
    let before = fs::read(store.snapshot_path()).unwrap();

    let future = write_file(
        dir.path(),
        "future.xml",
        r#"<model version="9.9.9" name="Future"/>"#,
    );
    let error = run_import(&store, &future).unwrap_err();
    assert!(matches!(
        error.downcast_ref::<PersistenceError>(),
        Some(PersistenceError::VersionMismatch { .. })
    ));
    assert_eq!(fs::read(store.snapshot_path()).unwrap(), before);
    assert!(run_backups(&store).unwrap().is_empty());
}

#[test]
fn second_import_and_remove_create_backups() {
    let dir = tempdir().unwrap();
    let store = open_store(Some(dir.path()), None).unwrap();
    let source = write_file(dir.path(), "plant1.xml", PLANT1);
    run_import(&store, &source).unwrap();
    run_import(&store, &source).unwrap();
    assert_eq!(run_backups(&store).unwrap().len(), 1);

    assert!(run_remove(&store).unwrap());
    assert!(!store.has_saved_model());
    assert!(!run_remove(&store).unwrap());
    assert_eq!(run_backups(&store).unwrap().len(), 2);

    let info = run_info(&store).unwrap();
    assert!(info.model_name.is_none());
    assert_eq!(info.backups, 2);
}

#[test]
fn export_without_saved_model_fails() {
    let dir = tempdir().unwrap();
    let store = open_store(Some(dir.path()), None).unwrap();
    let target = dir.path().join("out.xml");
    assert!(run_export(&store, &target).is_err());
    assert!(!target.exists());
}

#[test]
fn config_file_in_home_is_honoured() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        DEFAULT_CONFIG_FILE,
        "data_dir = \"state\"\nsnapshot_file = \"plant.xml\"\n",
    );
    let store = open_store(Some(dir.path()), None).unwrap();
    assert_eq!(store.snapshot_path(), dir.path().join("state").join("plant.xml"));
}

#[test]
fn malformed_config_is_reported() {
    let dir = tempdir().unwrap();
    let config = write_file(dir.path(), "custom.toml", "data_dir = [");
    let error = open_store(Some(dir.path()), Some(&config)).unwrap_err();
    assert!(matches!(
        error.downcast_ref::<PersistenceError>(),
        Some(PersistenceError::Config { .. })
    ));
}
