//! Human-in-the-Loop Input
//!
//! Strategies for supplying the turn of a human role. When the scheduler
//! selects a role configured for human input, the conversation driver
//! suspends and asks a strategy for the message content; this crate provides
//! console, channel (for UI frontends), and mock implementations.
//!
//! # Example
//!
//! ```
//! use roundtable_hitl::{InputRequest, InputStrategy, MockInput};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let strategy = MockInput::scripted(["Looks good, TERMINATE"]);
//!
//!     let request = InputRequest::new("Admin", "Planner: Plan ready")
//!         .with_timeout(Duration::from_secs(30));
//!
//!     let response = strategy.request_input(request).await?;
//!     println!("Response: {:?}", response);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod request;
pub mod strategy;

// Built-in strategies
pub mod channel;
pub mod console;
pub mod mock;

// Re-exports
pub use error::{InputError, Result};
pub use request::{InputRequest, InputResponse};
pub use strategy::InputStrategy;

pub use channel::ChannelInput;
pub use console::ConsoleInput;
pub use mock::MockInput;
