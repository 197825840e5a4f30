//! The turn scheduler
//!
//! A pure function of the transcript and the transition table: given who
//! spoke last, which roles may speak next. The scheduler never mutates
//! anything and never consults more than the last message's sender, so
//! calling it twice with the same inputs always yields the same answer.

use crate::table::TransitionTable;
use crate::transcript::Transcript;

/// Compute the ordered set of roles permitted to speak next
///
/// - Empty transcript: the table's initial role (the role designated to
///   receive the task).
/// - Otherwise: the table entry for the last speaker, verbatim.
/// - An absent entry or an empty entry yields the empty set, which signals
///   conversation termination to the caller.
pub fn next_speakers<'a>(transcript: &Transcript, table: &'a TransitionTable) -> Vec<&'a str> {
    match transcript.last_speaker() {
        None => vec![table.initial_role()],
        Some(last) => table
            .allowed_after(last)
            .iter()
            .map(String::as_str)
            .collect(),
    }
}

/// Resolves one speaker when the scheduler returns several candidates
///
/// Implementations must be deterministic given the same transcript and
/// candidate list; conversations are replayed in tests and a nondeterministic
/// selector would make transcripts unreproducible.
pub trait SpeakerSelector: Send + Sync {
    /// Pick exactly one candidate, or `None` if the list is empty
    fn select<'a>(&self, transcript: &Transcript, candidates: &'a [&'a str]) -> Option<&'a str>;

    /// Selector name (for logging/debugging)
    fn name(&self) -> &str;
}

/// Default selector: the first candidate in table order
pub struct FirstCandidate;

impl SpeakerSelector for FirstCandidate {
    fn select<'a>(&self, _transcript: &Transcript, candidates: &'a [&'a str]) -> Option<&'a str> {
        candidates.first().copied()
    }

    fn name(&self) -> &str {
        "first-candidate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::{Role, Roster};

    fn topology() -> (Roster, TransitionTable) {
        let roster = Roster::new(vec![
            Role::relay("Admin"),
            Role::relay("Planner"),
            Role::relay("Writer"),
        ])
        .unwrap();

        let table = TransitionTable::builder("Admin")
            .allow("Admin", ["Planner", "Writer"])
            .allow("Planner", ["Admin"])
            .build(&roster)
            .unwrap();

        (roster, table)
    }

    #[test]
    fn test_empty_transcript_returns_initial() {
        let (_, table) = topology();
        let transcript = Transcript::new();

        assert_eq!(next_speakers(&transcript, &table), vec!["Admin"]);
    }

    #[test]
    fn test_returns_entry_verbatim() {
        let (_, table) = topology();
        let mut transcript = Transcript::new();
        transcript.append("Admin", "Summarize X");

        assert_eq!(next_speakers(&transcript, &table), vec!["Planner", "Writer"]);
    }

    #[test]
    fn test_absent_sender_terminates() {
        let (_, table) = topology();
        let mut transcript = Transcript::new();
        // Writer has no table entry, so nothing may follow it
        transcript.append("Writer", "Report attached");

        assert!(next_speakers(&transcript, &table).is_empty());
    }

    #[test]
    fn test_idempotence() {
        let (_, table) = topology();
        let mut transcript = Transcript::new();
        transcript.append("Admin", "Summarize X");

        let first = next_speakers(&transcript, &table);
        let second = next_speakers(&transcript, &table);
        assert_eq!(first, second);
    }

    #[test]
    fn test_first_candidate_selector() {
        let selector = FirstCandidate;
        let transcript = Transcript::new();

        assert_eq!(
            selector.select(&transcript, &["Planner", "Writer"]),
            Some("Planner")
        );
        assert_eq!(selector.select(&transcript, &[]), None);
        assert_eq!(selector.name(), "first-candidate");
    }
}
