use crate::core::{command_init::CommandContext, error::Result, print_success};

pub fn execute_rename(context: &mut CommandContext, old_name: &str, new_name: &str) -> Result<()> {
    context.registry.rename(old_name, new_name, &context.factory)?;
    print_success(&format!("Renamed {old_name} to {new_name}"));
    Ok(())
}
