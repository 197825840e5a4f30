//! Scripted run of the financial-report hub team
//!
//! Drives a full conversation without any network calls: every role's turns
//! come from a script. With the default first-candidate selector the hub
//! table alternates between the Admin and its first specialist, the Planner.
//!
//! Run with: cargo run --example scripted_report

use roundtable_chat::financial_report_hub;
use roundtable_core::logging::{init_logging, LogConfig};
use roundtable_runtime::{ConsoleSink, ConversationDriver, ScriptedEmitter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LogConfig::default());

    let team = financial_report_hub("openai", "gpt-4-turbo")?;

    let emitter = ScriptedEmitter::new()
        .say(
            "Planner",
            "Step 1: fetch NVDA closing prices. Step 2: plot them. Step 3: write the report.",
        )
        .say("Admin", "Proceed with the plan and report back.")
        .say(
            "Planner",
            "All steps done. Prices rose over the period; the plot is saved as nvda.png.",
        )
        .say("Admin", "Report accepted. TERMINATE");

    let driver = ConversationDriver::builder()
        .team(team)
        .emitter(emitter)
        .sink(ConsoleSink)
        .build()?;

    let conversation = driver
        .run("Write a financial report about Nvidia's stock price performance.")
        .await?;

    println!(
        "\nConversation {} ended: {:?} ({} messages)",
        conversation.id(),
        conversation.stop_reason(),
        conversation.transcript().len()
    );

    Ok(())
}
