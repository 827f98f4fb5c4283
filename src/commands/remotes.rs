use crate::core::{command_init::CommandContext, error::Result, print_info};
use colored::*;

pub fn execute_remotes(context: &CommandContext) -> Result<()> {
    let records = context.registry.records(&context.factory);
    print_info(&format!("Found {} watches", records.len().to_string().blue().bold()));

    for record in &records {
        println!(" {}", record.name.white().bold());
        let remotes = match (&record.watch, &record.error) {
            (Some(watch), _) => watch.remotes(),
            (None, error) => {
                println!("  {}\n", error.as_deref().unwrap_or("no watch").red());
                continue;
            }
        };
        match remotes {
            Ok(remotes) if remotes.is_empty() => println!("  {}", "(no remotes)".bright_black()),
            Ok(remotes) => {
                for remote in remotes {
                    println!("  {remote}");
                }
            }
            Err(e) => println!("  {}", e.to_string().red()),
        }
        println!();
    }
    Ok(())
}
