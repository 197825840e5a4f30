//! Console-based input strategy

use async_trait::async_trait;
use std::io::{self, Write};

use crate::{InputRequest, InputResponse, InputStrategy, Result};

/// Console input strategy
///
/// Prompts for the human turn via stdin/stdout.
/// Use for CLI applications and local development.
pub struct ConsoleInput {
    /// Treat an empty line as a skipped turn instead of empty content
    empty_line_cancels: bool,
}

impl ConsoleInput {
    /// Create a new console input strategy
    pub fn new() -> Self {
        Self {
            empty_line_cancels: true,
        }
    }

    /// Whether an empty line cancels the request
    pub fn empty_line_cancels(mut self, enabled: bool) -> Self {
        self.empty_line_cancels = enabled;
        self
    }
}

impl Default for ConsoleInput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InputStrategy for ConsoleInput {
    async fn request_input(&self, request: InputRequest) -> Result<InputResponse> {
        println!("\n🗣 YOUR TURN ({})", request.role);
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("{}", request.prompt);
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━");
        print!("\n{}> ", request.role);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() && self.empty_line_cancels {
            tracing::info!("Console input cancelled for role {}", request.role);
            return Ok(InputResponse::Cancelled);
        }

        tracing::info!("Console input received for role {}", request.role);
        Ok(InputResponse::Submitted {
            content: input.to_string(),
        })
    }

    fn name(&self) -> &str {
        "console"
    }
}
