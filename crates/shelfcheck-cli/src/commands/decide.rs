//! Decide command - record reviewer decisions in a session file.

use std::path::PathBuf;

use colored::{ColoredString, Colorize};
use shelfcheck::{Decision, DecisionStatus, ReviewSession};

use crate::cli::TierChoice;

use super::existing_session;

pub struct DecideArgs {
    pub file: PathBuf,
    pub accept: Vec<String>,
    pub reject: Vec<String>,
    /// Correction id and the value to write instead.
    pub modify: Option<(String, String)>,
    pub tier: Option<TierChoice>,
    pub undo: Vec<String>,
    pub user: String,
    pub notes: Option<String>,
}

impl DecideArgs {
    fn is_empty(&self) -> bool {
        self.accept.is_empty()
            && self.reject.is_empty()
            && self.modify.is_none()
            && self.tier.is_none()
            && self.undo.is_empty()
    }

    fn decision(&self, correction_id: &str, status: DecisionStatus) -> Decision {
        let decision = Decision::new(correction_id, status).with_decided_by(&self.user);
        match &self.notes {
            Some(notes) => decision.with_notes(notes),
            None => decision,
        }
    }
}

pub fn run(args: DecideArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.is_empty() {
        return Err("Nothing to decide. Use --accept, --reject, --modify, --tier, or --undo.".into());
    }

    let path = existing_session(&args.file)?;
    let mut session = ReviewSession::load(&path)?;

    // Undo first so an id can be undone and re-decided in one call
    for id in &args.undo {
        match session.undo(id) {
            Some(_) => print_change(&session, id, "UNDO".yellow()),
            None => println!("  {} {} had no decision", "SKIP".dimmed(), id),
        }
    }

    for id in &args.accept {
        session.record(args.decision(id, DecisionStatus::Accepted))?;
        print_change(&session, id, "ACCEPT".green());
    }

    for id in &args.reject {
        session.record(args.decision(id, DecisionStatus::Rejected))?;
        print_change(&session, id, "REJECT".red());
    }

    if let Some((id, value)) = &args.modify {
        session.record(args.decision(id, DecisionStatus::Modified).with_value(value))?;
        print_change(&session, id, "MODIFY".blue());
    }

    if let Some(tier) = args.tier {
        let accepted = session.accept_tier(tier.into());
        println!(
            "  {} {} pending {} corrections",
            "ACCEPT".green(),
            accepted.to_string().white().bold(),
            shelfcheck::CorrectionTier::from(tier)
        );
    }

    session.save_with_history(&path)?;

    let counts = session.counts();
    println!();
    println!(
        "{} {} pending, {} accepted, {} modified, {} rejected",
        "Decisions:".yellow().bold(),
        counts.pending.to_string().white(),
        counts.accepted.to_string().green(),
        counts.modified.to_string().blue(),
        counts.rejected.to_string().red()
    );

    Ok(())
}

fn print_change(session: &ReviewSession, id: &str, label: ColoredString) {
    let Some(correction) = session.result.correction(id) else {
        println!("  {} {}", label, id);
        return;
    };
    let value = session.decisions.value_for(correction);
    println!(
        "  {} {} row {} {}: '{}' → '{}'",
        label,
        id.dimmed(),
        correction.row,
        correction.column.white().bold(),
        correction.original_value,
        value
    );
}
