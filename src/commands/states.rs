use crate::core::{
    colors::get_aligned_outcome, command_init::CommandContext, error::Result, print_info,
    print_warning, watch::SyncOutcome,
};
use colored::*;

/// Print the full remote/branch matrix of every selected repo
pub fn execute_states(context: &CommandContext, include: Option<&str>, exclude: Option<&str>) -> Result<()> {
    let records = context.filtered_records(include, exclude)?;
    if records.is_empty() {
        print_warning("No repos found");
        return Ok(());
    }
    print_info(&format!("States of {} repos", records.len().to_string().blue().bold()));

    for record in &records {
        println!(
            "\n {} ({}) @ {}",
            record.name.white().bold(),
            record.kind,
            record.path.display()
        );
        let Some(watch) = &record.watch else {
            println!("  {}", record.error.as_deref().unwrap_or("no watch").red());
            continue;
        };
        let states = match watch.states() {
            Ok(states) => states,
            Err(e) => {
                println!("  {}", e.to_string().red());
                continue;
            }
        };
        if states.is_empty() {
            println!("  {}", "(no remotes)".bright_black());
            continue;
        }

        let width = states
            .iter()
            .map(|s| s.remote.len() + s.branch.len() + 1)
            .max()
            .unwrap_or(0);
        for state in &states {
            let pair = format!("{}/{}", state.remote, state.branch);
            match (&state.outcome, &state.error) {
                (SyncOutcome::Fail, Some(error)) => println!(
                    "  {:<width$}  {} {}",
                    pair,
                    get_aligned_outcome(state.outcome),
                    error.bright_black()
                ),
                _ => println!("  {:<width$}  {}", pair, get_aligned_outcome(state.outcome)),
            }
        }
    }
    Ok(())
}
