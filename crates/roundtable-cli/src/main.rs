//! Roundtable CLI
//!
//! Runs one financial-report group chat for a task given on the command
//! line. The team shape is selected with `--preset`; `--interactive` makes
//! the Admin a human role whose turns are typed on the console.
//!
//! Usage:
//!   roundtable [--preset hub|pipeline|panel] [--interactive] <task...>

use std::process::ExitCode;

use roundtable_chat::{
    financial_report_hub, financial_report_panel, financial_report_pipeline, Role, Roster,
    TerminationPolicy, Team,
};
use roundtable_core::{
    config::load_config_or_default,
    logging::{init_logging, LogConfig},
};
use roundtable_hitl::ConsoleInput;
use roundtable_runtime::{ConsoleSink, ConversationDriver, LlmEmitter};

struct CliArgs {
    preset: String,
    interactive: bool,
    task: String,
}

fn parse_args() -> Result<CliArgs, String> {
    let mut preset = "hub".to_string();
    let mut interactive = false;
    let mut task_words = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--preset" => {
                preset = args
                    .next()
                    .ok_or_else(|| "--preset needs a value (hub, pipeline, panel)".to_string())?;
            }
            "--interactive" => interactive = true,
            "--help" | "-h" => {
                return Err(
                    "Usage: roundtable [--preset hub|pipeline|panel] [--interactive] <task...>"
                        .to_string(),
                )
            }
            word => task_words.push(word.to_string()),
        }
    }

    if task_words.is_empty() {
        return Err("No task given. Example: roundtable \"Write a financial report about Nvidia's stock price performance.\"".to_string());
    }

    Ok(CliArgs {
        preset,
        interactive,
        task: task_words.join(" "),
    })
}

fn build_team(preset: &str, provider: &str, model: &str) -> Result<Team, String> {
    let team = match preset {
        "hub" => financial_report_hub(provider, model),
        "pipeline" => financial_report_pipeline(provider, model),
        "panel" => financial_report_panel(provider, model),
        other => return Err(format!("Unknown preset: {}", other)),
    };
    team.map_err(|e| e.to_string())
}

/// Swap the Admin for a human role, keeping the rest of the roster
fn with_human_admin(team: Team) -> Result<Team, String> {
    let roles = team
        .roster
        .roles()
        .iter()
        .map(|role| {
            if role.name == "Admin" {
                Role::human("Admin")
                    .description(role.description.clone())
                    .system_prompt(role.system_prompt.clone())
            } else {
                role.clone()
            }
        })
        .collect();

    let roster = Roster::new(roles).map_err(|e| e.to_string())?;
    Ok(Team {
        roster,
        table: team.table,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = load_config_or_default("roundtable.toml");
    init_logging(LogConfig {
        level: config.logging.level.clone(),
        json: config.logging.json,
    });

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let team = match build_team(&args.preset, &config.chat.provider, &config.chat.model) {
        Ok(team) => team,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let team = if args.interactive {
        match with_human_admin(team) {
            Ok(team) => team,
            Err(message) => {
                eprintln!("{}", message);
                return ExitCode::FAILURE;
            }
        }
    } else {
        team
    };

    let openai_key = std::env::var("OPENAI_API_KEY").ok();
    let anthropic_key = std::env::var("ANTHROPIC_API_KEY").ok();

    let emitter = match LlmEmitter::for_roster(
        &team.roster,
        openai_key.as_deref(),
        anthropic_key.as_deref(),
    ) {
        Ok(emitter) => emitter,
        Err(e) => {
            eprintln!("Provider setup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let policy = match TerminationPolicy::new(&config.chat.termination_token, config.chat.max_rounds)
    {
        Ok(policy) => policy,
        Err(e) => {
            eprintln!("Invalid chat settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut builder = ConversationDriver::builder()
        .team(team)
        .policy(policy)
        .emitter(emitter)
        .sink(ConsoleSink);

    if args.interactive {
        builder = builder.input(ConsoleInput::new());
    }

    let driver = match builder.build() {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("Driver setup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("🤖 roundtable v{}", env!("CARGO_PKG_VERSION"));
    println!("Task: {}\n", args.task);

    match driver.run(&args.task).await {
        Ok(conversation) => {
            println!(
                "\nConversation ended: {:?} ({} messages{})",
                conversation.stop_reason(),
                conversation.transcript().len(),
                if conversation.is_complete() {
                    ""
                } else {
                    ", incomplete"
                }
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Conversation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_team_known_presets() {
        for preset in ["hub", "pipeline", "panel"] {
            assert!(build_team(preset, "openai", "gpt-4-turbo").is_ok());
        }
        assert!(build_team("unknown", "openai", "gpt-4-turbo").is_err());
    }

    #[test]
    fn test_with_human_admin_swaps_only_admin() {
        let team = build_team("hub", "openai", "gpt-4-turbo").unwrap();
        let team = with_human_admin(team).unwrap();

        let admin = team.roster.get("Admin").unwrap();
        assert!(admin.kind.is_human_input());

        let planner = team.roster.get("Planner").unwrap();
        assert!(planner.kind.requires_generation());
    }
}
