mod common;

use std::fs;

use study_centre::data::{read_catalog, validate_catalog, Severity};
use study_centre::routes::Router;
use study_centre::{load_catalog, LoadError};
use tempfile::TempDir;

#[test]
fn bundled_content_loads_without_issues() {
    let catalog = load_catalog(common::bundled_content()).unwrap();
    assert_eq!(catalog.courses.len(), 1);
    assert_eq!(catalog.exams.len(), 1);
    assert!(validate_catalog(&catalog).is_empty());

    let router = Router::from_catalog(&catalog).unwrap();
    let routes: Vec<&str> = router.routes().collect();
    assert_eq!(
        routes,
        [
            "/coshh-awareness/module-1/section-1",
            "/coshh-awareness/module-1/section-2"
        ]
    );
    assert_eq!(
        router.next("/coshh-awareness/module-1/section-1"),
        Some("/coshh-awareness/module-1/section-2")
    );
}

#[test]
fn bundled_exam_uses_camel_case_fields() {
    let catalog = load_catalog(common::bundled_content()).unwrap();
    let exam = catalog.exam("coshh-awareness").unwrap();
    assert_eq!(exam.config.total_questions, 12);
    assert_eq!(exam.config.time_limit_secs, 900);
    assert_eq!(exam.config.categories.len(), 3);
    assert!(exam.questions.iter().all(|q| q.topic.is_some()));
}

#[test]
fn single_file_catalog_round_trips_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    let catalog = common::catalog();
    fs::write(&path, serde_json::to_string_pretty(&catalog).unwrap()).unwrap();

    assert_eq!(load_catalog(&path).unwrap(), catalog);
}

#[test]
fn directory_layout_reads_courses_and_exams() {
    let dir = TempDir::new().unwrap();
    let catalog = common::catalog();
    fs::create_dir_all(dir.path().join("courses")).unwrap();
    fs::create_dir_all(dir.path().join("exams")).unwrap();
    fs::write(
        dir.path().join("courses/hnc.json"),
        serde_json::to_string(&catalog.courses[0]).unwrap(),
    )
    .unwrap();
    fs::write(
        dir.path().join("exams/am2.json"),
        serde_json::to_string(&catalog.exams[0]).unwrap(),
    )
    .unwrap();
    fs::write(dir.path().join("courses/notes.txt"), "ignored").unwrap();

    assert_eq!(load_catalog(dir.path()).unwrap(), catalog);
}

#[test]
fn empty_directory_is_rejected() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(read_catalog(dir.path()), Err(LoadError::Empty(_))));
}

#[test]
fn malformed_json_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"courses\": [").unwrap();

    match load_catalog(&path) {
        Err(LoadError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        load_catalog(dir.path().join("absent.json")),
        Err(LoadError::Io { .. })
    ));
}

#[test]
fn invalid_content_reports_every_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    let mut catalog = common::catalog();
    let section = &mut catalog.courses[0].modules[0].sections[0];
    section.quiz[0].correct_answer = 4;
    section.next.as_mut().unwrap().to = "../section-9".to_string();
    fs::write(&path, serde_json::to_string(&catalog).unwrap()).unwrap();

    match load_catalog(&path) {
        Err(LoadError::Invalid { issues, .. }) => {
            assert_eq!(issues.len(), 2);
            assert!(issues.iter().all(|i| i.severity == Severity::Error));
            assert!(issues.iter().any(|i| i.message.contains("/hnc/module-1/section-9")));
        }
        other => panic!("expected validation errors, got {other:?}"),
    }
}
