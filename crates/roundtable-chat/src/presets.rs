//! Ready-made financial-report team topologies
//!
//! Three shapes for the same six-role reporting team, differing only in
//! their transition tables:
//!
//! - [`financial_report_hub`]: every specialist reports back to the Admin,
//!   who dispatches the next turn (hub-and-spoke, includes a Critic).
//! - [`financial_report_pipeline`]: Admin hands the task to the Planner,
//!   who routes work through Engineer and Executor before the Writer
//!   reports back.
//! - [`financial_report_panel`]: Admin fans out to any specialist and the
//!   specialists hand off among themselves.

use crate::error::Result;
use crate::role::{Role, Roster};
use crate::table::TransitionTable;

/// A roster plus the transition table that governs it
#[derive(Debug, Clone)]
pub struct Team {
    /// Declared roles
    pub roster: Roster,
    /// Validated speaker transitions
    pub table: TransitionTable,
}

fn admin(provider: &str, model: &str) -> Role {
    Role::generating("Admin", provider, model)
        .description("Gives the task and dispatches the next specialist.")
        .system_prompt(
            "You oversee the workflow for a financial report. Hand out the task, \
             review what each specialist returns, and send instructions to the \
             writer to refine the report. Reply TERMINATE when the report is done.",
        )
}

fn planner(provider: &str, model: &str) -> Role {
    Role::generating("Planner", provider, model)
        .description("Breaks the task into steps and tracks progress.")
        .system_prompt(
            "Given a task, determine what information is needed to complete it. \
             All information must be retrievable via code. Break the task into \
             steps, check progress after each one, and instruct the next step. \
             Handle failures gracefully. Never ask the engineer to run code, \
             only to write it.",
        )
}

fn engineer(provider: &str, model: &str) -> Role {
    Role::generating("Engineer", provider, model)
        .description("Writes code for the plan; never runs it.")
        .system_prompt(
            "You follow an approved plan. Write complete python or shell code to \
             solve the task, wrapped in a code block that names the script type. \
             Do not suggest partial code or code that requires edits by others. \
             Check the execution result returned by the executor; if it shows an \
             error, fix the error and output the full code again.",
        )
}

fn executor(provider: &str, model: &str) -> Role {
    Role::generating("Executor", provider, model)
        .description("Runs the engineer's code and reports the result.")
        .system_prompt(
            "Execute the code written by the engineer and report the result, \
             including any saved plots or data files. When execution completes \
             successfully, pass the results on so the report can be prepared.",
        )
}

fn writer(provider: &str, model: &str) -> Role {
    Role::generating("Writer", provider, model)
        .description("Writes the financial report and refines it on feedback.")
        .system_prompt(
            "Write the financial report in markdown format with relevant titles, \
             and put the content in a ```md``` code block. Base it on the \
             execution results and refine it from the Admin's feedback.",
        )
}

fn critic(provider: &str, model: &str) -> Role {
    Role::generating("Critic", provider, model)
        .description("Reviews plans, claims, and code from the other roles.")
        .system_prompt(
            "Double check the plan, claims, and code from the other roles and \
             provide feedback. Check whether the plan includes verifiable \
             information such as source URLs.",
        )
}

/// Hub-and-spoke team: Admin dispatches, every specialist reports back
///
/// The Admin may hand off to any specialist, and every specialist hands
/// back to the Admin.
pub fn financial_report_hub(provider: &str, model: &str) -> Result<Team> {
    let roster = Roster::new(vec![
        admin(provider, model),
        planner(provider, model),
        critic(provider, model),
        engineer(provider, model),
        executor(provider, model),
        writer(provider, model),
    ])?;

    let table = TransitionTable::builder("Admin")
        .allow("Admin", ["Planner", "Critic", "Engineer", "Executor", "Writer"])
        .allow("Planner", ["Admin"])
        .allow("Critic", ["Admin"])
        .allow("Engineer", ["Admin"])
        .allow("Executor", ["Admin"])
        .allow("Writer", ["Admin"])
        .build(&roster)?;

    Ok(Team { roster, table })
}

/// Pipeline team: the Planner routes work, the Writer reports back
pub fn financial_report_pipeline(provider: &str, model: &str) -> Result<Team> {
    let roster = Roster::new(vec![
        admin(provider, model),
        planner(provider, model),
        engineer(provider, model),
        executor(provider, model),
        writer(provider, model),
    ])?;

    let table = TransitionTable::builder("Admin")
        .allow("Admin", ["Planner"])
        .allow("Planner", ["Engineer", "Executor", "Writer"])
        .allow("Engineer", ["Executor"])
        .allow("Executor", ["Planner"])
        .allow("Writer", ["Admin", "Planner"])
        .build(&roster)?;

    Ok(Team { roster, table })
}

/// Open panel: Admin fans out, specialists hand off among themselves
pub fn financial_report_panel(provider: &str, model: &str) -> Result<Team> {
    let roster = Roster::new(vec![
        admin(provider, model),
        planner(provider, model),
        engineer(provider, model),
        executor(provider, model),
        writer(provider, model),
    ])?;

    let table = TransitionTable::builder("Admin")
        .allow("Admin", ["Engineer", "Writer", "Executor", "Planner"])
        .allow("Engineer", ["Admin", "Executor"])
        .allow("Writer", ["Admin", "Planner"])
        .allow("Executor", ["Admin", "Engineer", "Planner"])
        .allow("Planner", ["Admin", "Engineer", "Writer"])
        .build(&roster)?;

    Ok(Team { roster, table })
}
