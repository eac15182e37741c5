//! Human review of proposed corrections.
//!
//! A validation result is never edited after it is built. Decisions live in
//! a [`DecisionMap`] beside it, and a [`ReviewSession`] bundles both with the
//! rows so a review can be saved, resumed and applied later.
//!
//! # Overview
//!
//! ```text
//! data/
//! ├── sales.csv                       # Original upload (never modified)
//! └── sales.shelfcheck.json           # Review session
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use shelfcheck::curation::{ReviewSession, session_path};
//! use shelfcheck::{CorrectionTier, Parser, Pipeline};
//!
//! let (rows, source) = Parser::new().parse_file("sales.csv").unwrap();
//! let outcome = Pipeline::new().run(&rows);
//! let mut session = ReviewSession::from_outcome(outcome, Some(source));
//!
//! // Bulk-accept the safe fixes, then decide the rest one by one
//! session.accept_tier(CorrectionTier::Auto);
//! session.reject("cor_004", Some("Store name is correct")).unwrap();
//! session.modify("cor_007", "Sainsbury's").unwrap();
//!
//! session.save(session_path("sales.csv")).unwrap();
//!
//! // Later, load and apply
//! let session = ReviewSession::load(session_path("sales.csv")).unwrap();
//! let applied = session.apply();
//! println!("Changed {} cells", applied.applied_count());
//! ```

mod decision;
mod session;

pub use decision::{Decision, DecisionCounts, DecisionMap, DecisionStatus};
pub use session::{ReviewSession, SESSION_VERSION, session_path};
