use crate::core::{command_init::CommandContext, error::Result, print_info};
use colored::*;

pub fn execute_show(context: &CommandContext) -> Result<()> {
    let records = context.registry.records(&context.factory);
    print_info(&format!("Found {} watches", records.len().to_string().blue().bold()));

    let width = records.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for record in &records {
        let state = match &record.error {
            Some(error) => error.red(),
            None => record.kind.cyan(),
        };
        println!(
            " {} {} @ {}",
            format!("{:<width$}", record.name).white().bold(),
            state,
            record.path.display()
        );
    }
    Ok(())
}
