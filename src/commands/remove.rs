use crate::core::{
    command_init::CommandContext,
    dirs::absolute_path,
    error::{ReposError, Result},
    print_success,
};
use std::path::Path;

/// Remove by name, falling back to the directory the argument points at
pub fn execute_remove(context: &mut CommandContext, name_or_directory: &str) -> Result<()> {
    let name = match context.registry.get(name_or_directory) {
        Some(_) => name_or_directory.to_string(),
        None => {
            let path = absolute_path(Path::new(name_or_directory))?;
            context
                .registry
                .watched(&path)
                .map(str::to_string)
                .ok_or_else(|| ReposError::repo_not_found(name_or_directory))?
        }
    };

    context.registry.remove(&name)?;
    print_success(&format!("Removed {name} from watch list"));
    Ok(())
}
