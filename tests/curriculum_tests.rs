//! Curriculum progress, credit cap and CGPA tests
mod common;

use acadflow_mcp::academic::Grade;
use acadflow_mcp::storage::COMPLETED_COURSES_KEY;
use acadflow_mcp::*;
use common::*;

async fn complete(handler: &AcadflowServerHandler, code: &str) {
    handler
        .handle_toggle_course(code.to_string(), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_toggle_adds_and_removes() {
    let (handler, _temp_dir) = get_test_handler();

    let result = handler
        .handle_toggle_course("CSE3003".to_string(), None)
        .await
        .unwrap();
    assert!(result.contains("marked as completed"));
    assert!(result.contains("4 / 20 credits in Programme Core"));
    assert!(handler.snapshot().tracker.is_completed("CSE3003"));

    let result = handler
        .handle_toggle_course("CSE3003".to_string(), None)
        .await
        .unwrap();
    assert!(result.contains("removed from completed courses"));
    assert!(handler.snapshot().tracker.completed().is_empty());
}

#[tokio::test]
async fn test_cap_rejects_course_and_leaves_state_unchanged() {
    let (handler, _temp_dir) = get_test_handler();

    // Basic Sciences and Mathematics: cap 9
    complete(&handler, "MAT1001").await;
    complete(&handler, "MAT2003").await;
    let before = handler.snapshot();

    let result = handler
        .handle_toggle_course("PHY1001".to_string(), None)
        .await;
    assert!(result.is_err());
    assert_eq!(handler.snapshot(), before);
    assert_eq!(before.tracker.category_completed_credits(4), 7);
}

#[tokio::test]
async fn test_cap_allows_exact_fill() {
    let (handler, _temp_dir) = get_test_handler();

    // Programme Elective: cap 10 = 4 + 4 + 2
    complete(&handler, "CSE3015").await;
    complete(&handler, "CSE4007").await;
    complete(&handler, "CSE0002").await;
    assert_eq!(handler.snapshot().tracker.category_completed_credits(3), 10);

    assert!(
        handler
            .handle_toggle_course("CSE4015".to_string(), None)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_removing_frees_capacity() {
    let (handler, _temp_dir) = get_test_handler();

    complete(&handler, "MAT1001").await;
    complete(&handler, "MAT2003").await;
    assert!(
        handler
            .handle_toggle_course("PHY1001".to_string(), None)
            .await
            .is_err()
    );

    complete(&handler, "MAT2003").await;
    complete(&handler, "PHY1001").await;
    let tracker = handler.snapshot().tracker;
    assert!(tracker.is_completed("PHY1001"));
    assert!(!tracker.is_completed("MAT2003"));
    assert_eq!(tracker.category_completed_credits(4), 7);
}

#[tokio::test]
async fn test_toggle_unknown_course_or_category() {
    let (handler, _temp_dir) = get_test_handler();

    assert!(
        handler
            .handle_toggle_course("XYZ9999".to_string(), None)
            .await
            .is_err()
    );
    assert!(
        handler
            .handle_toggle_course("CSE3003".to_string(), Some(99))
            .await
            .is_err()
    );
    assert!(
        handler
            .handle_toggle_course("CSE3003".to_string(), Some(1))
            .await
            .is_err()
    );
    assert!(
        handler
            .handle_toggle_course("  ".to_string(), None)
            .await
            .is_err()
    );
    assert!(handler.snapshot().tracker.completed().is_empty());
}

#[tokio::test]
async fn test_remove_course_from_unknown_category() {
    let store = MemoryStore::new();
    store
        .save(
            COMPLETED_COURSES_KEY,
            r#"[{"category_id": 99, "course_code": "CSE3003", "course_title": "Operating System", "credits": 4}]"#,
        )
        .unwrap();
    let handler = AcadflowServerHandler::with_store(
        Box::new(store),
        ReferenceData::builtin().unwrap(),
        test_today(),
    );
    assert!(handler.snapshot().tracker.is_completed("CSE3003"));

    let result = handler
        .handle_toggle_course("CSE3003".to_string(), None)
        .await
        .unwrap();
    assert_eq!(result, "Course CSE3003 removed from completed courses");
    assert!(handler.snapshot().tracker.completed().is_empty());
}

#[tokio::test]
async fn test_remove_ignores_category_argument() {
    let (handler, _temp_dir) = get_test_handler();

    complete(&handler, "CSE3003").await;
    let result = handler
        .handle_toggle_course("CSE3003".to_string(), Some(99))
        .await
        .unwrap();
    assert!(result.contains("removed from completed courses (0 / 20 credits"));
    assert!(handler.snapshot().tracker.completed().is_empty());
}

#[tokio::test]
async fn test_explicit_category() {
    let (handler, _temp_dir) = get_test_handler();

    handler
        .handle_toggle_course("ENG1002".to_string(), Some(1))
        .await
        .unwrap();
    let tracker = handler.snapshot().tracker;
    assert_eq!(tracker.get("ENG1002").unwrap().category_id, 1);
    assert_eq!(tracker.get("ENG1002").unwrap().credits, 2);
}

#[tokio::test]
async fn test_cgpa_weighted_by_credits() {
    let (handler, _temp_dir) = get_test_handler();

    complete(&handler, "CSE2001").await;
    complete(&handler, "ENG1002").await;
    complete(&handler, "MGT1001").await;

    handler
        .handle_set_grade("CSE2001".to_string(), Some("S".to_string()))
        .await
        .unwrap();
    let result = handler
        .handle_set_grade("ENG1002".to_string(), Some("b".to_string()))
        .await
        .unwrap();

    // (4 * 10 + 2 * 8) / 6, MGT1001 is ungraded
    assert!(result.contains("CGPA: 9.33"));
    assert_eq!(handler.snapshot().tracker.cgpa(), 9.33);

    let text = handler.handle_curriculum().await.unwrap();
    assert!(text.contains("CGPA: 9.33"));
}

#[tokio::test]
async fn test_failed_grade_counts_in_cgpa() {
    let (handler, _temp_dir) = get_test_handler();

    complete(&handler, "CSE2001").await;
    complete(&handler, "CSE2004").await;
    handler
        .handle_set_grade("CSE2001".to_string(), Some("A".to_string()))
        .await
        .unwrap();
    handler
        .handle_set_grade("CSE2004".to_string(), Some("F".to_string()))
        .await
        .unwrap();

    assert_eq!(handler.snapshot().tracker.cgpa(), 4.5);
}

#[tokio::test]
async fn test_set_grade_errors_and_clear() {
    let (handler, _temp_dir) = get_test_handler();

    assert!(
        handler
            .handle_set_grade("CSE2001".to_string(), Some("A".to_string()))
            .await
            .is_err()
    );

    complete(&handler, "CSE2001").await;
    assert!(
        handler
            .handle_set_grade("CSE2001".to_string(), Some("Z".to_string()))
            .await
            .is_err()
    );

    handler
        .handle_set_grade("CSE2001".to_string(), Some("A".to_string()))
        .await
        .unwrap();
    assert_eq!(
        handler.snapshot().tracker.get("CSE2001").unwrap().grade,
        Some(Grade::A)
    );

    let result = handler
        .handle_set_grade("CSE2001".to_string(), Some(String::new()))
        .await
        .unwrap();
    assert!(result.starts_with("Grade cleared"));
    assert!(!handler.snapshot().tracker.has_grades());
    assert!(!handler.handle_curriculum().await.unwrap().contains("CGPA"));
}

#[tokio::test]
async fn test_progress_header() {
    let (handler, _temp_dir) = get_test_handler();

    let text = handler.handle_curriculum().await.unwrap();
    assert!(text.starts_with("Completed: 0 / 51 credits (0.0%)"));

    complete(&handler, "CSE3003").await;
    let text = handler.handle_curriculum().await.unwrap();
    assert!(text.starts_with("Completed: 4 / 51 credits (7.8%)"));
    assert!(text.contains("[x] CSE3003"));
    assert!(text.contains("2. Programme Core (4 / 20 credits)"));
}

#[tokio::test]
async fn test_completed_courses_persist() {
    let (handler, temp_dir) = get_test_handler();

    complete(&handler, "CSE3003").await;
    complete(&handler, "MAT1001").await;
    handler
        .handle_set_grade("MAT1001".to_string(), Some("C".to_string()))
        .await
        .unwrap();
    drop(handler);

    assert!(
        temp_dir
            .path()
            .join(format!("{}.json", COMPLETED_COURSES_KEY))
            .exists()
    );

    let reopened = reopen_handler(&temp_dir);
    let tracker = reopened.snapshot().tracker;
    let codes: Vec<&str> = tracker
        .completed()
        .iter()
        .map(|c| c.course_code.as_str())
        .collect();
    assert_eq!(codes, vec!["CSE3003", "MAT1001"]);
    assert_eq!(tracker.get("MAT1001").unwrap().grade, Some(Grade::C));
}

#[tokio::test]
async fn test_malformed_snapshot_is_ignored() {
    let (handler, temp_dir) = get_test_handler();
    drop(handler);

    std::fs::write(
        temp_dir
            .path()
            .join(format!("{}.json", COMPLETED_COURSES_KEY)),
        "{ not json",
    )
    .unwrap();

    let reopened = reopen_handler(&temp_dir);
    assert!(reopened.snapshot().tracker.completed().is_empty());

    // The next save replaces the broken snapshot
    complete(&reopened, "CSE3003").await;
    drop(reopened);
    assert!(reopen_handler(&temp_dir).snapshot().tracker.is_completed("CSE3003"));
}
