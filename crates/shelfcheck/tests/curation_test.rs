//! Integration tests for review sessions and applying decisions.

use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

use shelfcheck::curation::{ReviewSession, session_path};
use shelfcheck::transform::SkipReason;
use shelfcheck::{
    CorrectionApplier, CorrectionTier, DecisionMap, DecisionStatus, Parser, Pipeline,
    QualityScorer, ShelfcheckError,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// Sales data with one fix in each applicable tier and one critical issue.
fn create_test_data() -> NamedTempFile {
    let content = "receipt_date,product_name,chain,receipt_id\n\
                   24/02/2025,Widget,Tesco,R1\n\
                   2025-02-25,,Tesco,R2\n\
                   2025-02-26,Gadget,tescos,R3\n\
                   2025-02-27,Widget,Asda,#4\n";
    create_test_file(content)
}

fn create_session() -> ReviewSession {
    let file = create_test_data();
    let (rows, source) = Parser::new().parse_file(file.path()).expect("Parse failed");
    ReviewSession::from_outcome(Pipeline::new().run(&rows), Some(source))
}

fn first_of(session: &ReviewSession, tier: CorrectionTier) -> String {
    session.result.corrections_by_tier(tier)[0].id.clone()
}

// =============================================================================
// Session Creation Tests
// =============================================================================

#[test]
fn test_session_from_outcome() {
    let session = create_session();

    assert_eq!(session.version, "1.0.0");
    assert!(session.source.as_ref().is_some_and(|s| s.row_count == 4));
    assert_eq!(session.rows.len(), 4);
    assert!(session.decisions.is_empty());

    for tier in CorrectionTier::ALL {
        assert!(
            !session.result.corrections_by_tier(tier).is_empty(),
            "expected a {} correction",
            tier
        );
    }

    let counts = session.counts();
    assert_eq!(counts.pending, session.result.corrections.len());
    assert_eq!(counts.approved(), 0);
}

// =============================================================================
// Decision Tests
// =============================================================================

#[test]
fn test_full_review_flow() {
    let mut session = create_session();
    let before = session.result.stats.clone();

    let accepted = session.accept_tier(CorrectionTier::Auto);
    assert!(accepted >= 1);

    let suggested = first_of(&session, CorrectionTier::Suggested);
    session.accept(&suggested).unwrap();

    let manual = first_of(&session, CorrectionTier::Manual);
    session.modify(&manual, "Gizmo").unwrap();

    let critical = first_of(&session, CorrectionTier::Critical);
    session.reject(&critical, Some("Fix in the till export")).unwrap();

    assert!(session.is_complete());

    let applied = session.apply();
    assert_eq!(applied.rows[0]["receipt_date"], "2025-02-24");
    assert_eq!(applied.rows[1]["product_name"], "Gizmo");
    assert_eq!(applied.rows[2]["chain"], "Tesco");
    assert_eq!(applied.rows[3]["receipt_id"], "#4");
    assert!(applied.skipped.is_empty());

    let after = session.revalidate(&applied.rows);
    assert!(after.errors.len() < before.errors_count);
    let delta = QualityScorer::delta(&before, &after.stats);
    assert!(delta.improved());
    assert!(delta.to_string().contains("% → "));
}

#[test]
fn test_critical_is_never_applied() {
    let mut session = create_session();
    let critical = first_of(&session, CorrectionTier::Critical);

    let err = session.accept(&critical).unwrap_err();
    assert!(matches!(err, ShelfcheckError::NotApplicable { .. }));
    assert_eq!(session.decisions.status(&critical), DecisionStatus::Pending);

    // Handing the critical correction to the applier directly is reported, not written
    let result = CorrectionApplier::apply(&session.rows, session.result.correction(&critical));
    assert_eq!(result.skipped[0].reason, SkipReason::NotApplicable);
    assert_eq!(result.rows, session.rows);
}

#[test]
fn test_undo_returns_to_pending() {
    let mut session = create_session();
    let suggested = first_of(&session, CorrectionTier::Suggested);

    session.accept(&suggested).unwrap();
    assert!(session.undo(&suggested).is_some());
    assert_eq!(session.decisions.status(&suggested), DecisionStatus::Pending);
    assert!(session.undo(&suggested).is_none());
}

#[test]
fn test_nothing_accepted_is_identity() {
    let session = create_session();
    let decisions = DecisionMap::new();

    let applied = CorrectionApplier::apply_decisions(&session.rows, &session.result, &decisions);
    assert_eq!(applied.rows, session.rows);
    assert!(applied.audit.is_empty());
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_save_and_resume() {
    let dir = TempDir::new().unwrap();
    let path = session_path(dir.path().join("sales.csv"));
    assert!(path.to_string_lossy().ends_with("sales.shelfcheck.json"));

    let mut session = create_session();
    let suggested = first_of(&session, CorrectionTier::Suggested);
    session.reject(&suggested, Some("Different chain")).unwrap();
    session.save(&path).unwrap();

    let mut resumed = ReviewSession::load(&path).unwrap();
    assert_eq!(resumed.decisions.status(&suggested), DecisionStatus::Rejected);
    assert_eq!(
        resumed.decisions.get(&suggested).unwrap().notes.as_deref(),
        Some("Different chain")
    );

    resumed.accept_tier(CorrectionTier::Auto);
    resumed.save_with_history(&path).unwrap();

    let history = ReviewSession::list_history(&path).unwrap();
    assert_eq!(history.len(), 1);
    let previous = ReviewSession::load(&history[0]).unwrap();
    assert_eq!(previous.decisions.len(), 1);
}

#[test]
fn test_session_json_shape() {
    let session = create_session();
    let json = serde_json::to_value(&session).unwrap();

    assert_eq!(json["dataset_type"], "sales");
    assert!(json["result"]["isValid"].is_boolean());
    assert!(json["decisions"].is_object());
    assert!(json["mapping"]["mappings"].is_array());
}
