use std::fs;
use std::path::Path;

use tempfile::TempDir;

use steeltally::app::{App, AppError};
use steeltally::config::Config;
use steeltally::report::ReportError;
use steeltally::sheet::Slot;

fn config_for(dir: &Path) -> Config {
    Config {
        passphrase: "steel".to_string(),
        data_dir: Some(dir.to_path_buf()),
    }
}

fn make_app(dir: &Path) -> App {
    App::new(config_for(dir)).unwrap()
}

#[test]
fn test_session_state_survives_restart() {
    let dir = TempDir::new().unwrap();

    let mut app = make_app(dir.path());
    app.add_shooter("Anna").unwrap();
    app.add_shooter("Bea").unwrap();
    app.record_time("Anna", Some(1), Slot::Time1, "4.21").unwrap();
    app.record_time("Anna", Some(2), Slot::Time2, "2.1+1.9").unwrap();
    app.set_round(2).unwrap();
    drop(app);

    let app = make_app(dir.path());
    assert_eq!(app.shooters(), ["Anna", "Bea"]);
    assert_eq!(app.current_round(), 2);

    let cell = app.cell("Anna", 2, Slot::Time2).unwrap();
    assert_eq!(cell.input, "2.1+1.9");
    assert_eq!(cell.total, Some(4.0));
    assert!(!cell.editable);
}

#[test]
fn test_fresh_dir_hydrates_to_empty_session() {
    let dir = TempDir::new().unwrap();
    let app = make_app(dir.path());

    assert!(app.shooters().is_empty());
    assert!(app.sheet().is_empty());
    assert_eq!(app.current_round(), 1);
}

#[test]
fn test_malformed_store_files_hydrate_to_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("shooters.json"), "not json").unwrap();
    fs::write(dir.path().join("times.json"), "[1,2,3]").unwrap();
    fs::write(dir.path().join("round.json"), "99").unwrap();

    let app = make_app(dir.path());
    assert!(app.shooters().is_empty());
    assert!(app.sheet().is_empty());
    assert_eq!(app.current_round(), 1);
}

#[test]
fn test_unlock_state_survives_restart() {
    let dir = TempDir::new().unwrap();

    let mut app = make_app(dir.path());
    app.add_shooter("Anna").unwrap();
    app.record_time("Anna", Some(1), Slot::Time1, "4.21").unwrap();
    app.unlock_cell("Anna", Some(1), Slot::Time1, "steel").unwrap();
    drop(app);

    let mut app = make_app(dir.path());
    assert!(app.cell("Anna", 1, Slot::Time1).unwrap().editable);
    let outcome = app.record_time("Anna", Some(1), Slot::Time1, "3.9").unwrap();
    assert_eq!(outcome.total, Some(3.9));
}

#[test]
fn test_rename_and_delete_persist() {
    let dir = TempDir::new().unwrap();

    let mut app = make_app(dir.path());
    app.add_shooter("Anna").unwrap();
    app.add_shooter("Bea").unwrap();
    app.record_time("Anna", Some(1), Slot::Time1, "4.21").unwrap();
    app.rename_shooter("Anna", "Annika").unwrap();
    app.delete_shooter("Bea").unwrap();
    drop(app);

    let app = make_app(dir.path());
    assert_eq!(app.shooters(), ["Annika"]);
    assert_eq!(app.cell("Annika", 1, Slot::Time1).unwrap().total, Some(4.21));
    assert!(app.cell("Anna", 1, Slot::Time1).is_none());
}

#[test]
fn test_csv_export_import_fixed_point_across_sessions() {
    let source_dir = TempDir::new().unwrap();
    let target_dir = TempDir::new().unwrap();

    let mut source = make_app(source_dir.path());
    source.add_shooter("Anna").unwrap();
    source.add_shooter("Bea").unwrap();
    source.record_time("Anna", Some(1), Slot::Time1, "10").unwrap();
    source.record_time("Anna", Some(1), Slot::Time2, "12").unwrap();
    source.record_time("Anna", Some(1), Slot::Time3, "8").unwrap();
    source.record_time("Anna", Some(2), Slot::Time1, "5").unwrap();
    source.record_time("Bea", Some(1), Slot::Time1, "6.5").unwrap();
    let exported = source.export_csv();

    let mut target = make_app(target_dir.path());
    assert_eq!(target.import_csv(&exported).unwrap(), 2);
    assert_eq!(target.export_csv(), exported);

    // Imported cells are committed and feed the rankings.
    assert!(!target.cell("Anna", 1, Slot::Time2).unwrap().editable);
    let steel = target.steel_ranking();
    assert_eq!(steel[0].username, "Bea");
    assert_eq!(steel[0].display_time, "6.50");
    assert_eq!(steel[1].username, "Anna");
    assert_eq!(steel[1].display_time, "14.00");
}

#[test]
fn test_failed_import_keeps_store_untouched() {
    let dir = TempDir::new().unwrap();

    let mut app = make_app(dir.path());
    app.add_shooter("Anna").unwrap();
    app.record_time("Anna", Some(1), Slot::Time1, "4.21").unwrap();

    let err = app.import_csv("Shooting Results\n\nnothing else\n").unwrap_err();
    assert_eq!(err, AppError::Report(ReportError::MissingRawSection));
    drop(app);

    let app = make_app(dir.path());
    assert_eq!(app.shooters(), ["Anna"]);
    assert_eq!(app.cell("Anna", 1, Slot::Time1).unwrap().total, Some(4.21));
}
