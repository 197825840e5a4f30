//! Group-Chat Domain Model
//!
//! The pure logic of a turn-based multi-role conversation: roles with fixed
//! handoff permissions, an append-only transcript, the transition table that
//! governs who may speak after whom, the turn scheduler, and the termination
//! policy. Everything here is synchronous and side-effect free; the driver in
//! `roundtable-runtime` supplies the asynchronous collaborators.
//!
//! # Example
//!
//! ```
//! use roundtable_chat::{next_speakers, Role, Roster, Transcript, TransitionTable};
//!
//! let roster = Roster::new(vec![
//!     Role::relay("Admin").description("Hands out the task"),
//!     Role::relay("Planner").description("Breaks the task into steps"),
//! ]).unwrap();
//!
//! let table = TransitionTable::builder("Admin")
//!     .allow("Admin", ["Planner"])
//!     .allow("Planner", ["Admin"])
//!     .build(&roster)
//!     .unwrap();
//!
//! let mut transcript = Transcript::new();
//! transcript.append("Admin", "Summarize X");
//!
//! assert_eq!(next_speakers(&transcript, &table), vec!["Planner"]);
//! ```

pub mod error;
pub mod message;
pub mod presets;
pub mod role;
pub mod scheduler;
pub mod table;
pub mod termination;
pub mod transcript;

// Re-exports
pub use error::{Result, TopologyError};
pub use message::ChatMessage;
pub use presets::{financial_report_hub, financial_report_panel, financial_report_pipeline, Team};
pub use role::{Role, RoleKind, Roster};
pub use scheduler::{next_speakers, FirstCandidate, SpeakerSelector};
pub use table::{TransitionTable, TransitionTableBuilder};
pub use termination::TerminationPolicy;
pub use transcript::Transcript;
