use crate::core::{
    command_init::CommandContext, dirs::absolute_path, error::Result, print_info, print_success,
    print_warning,
};
use colored::*;
use std::path::Path;

pub fn execute_add(context: &mut CommandContext, name: &str, directory: &Path, force: bool) -> Result<()> {
    let path = absolute_path(directory)?;
    print_info(&format!(
        "Adding repository {} as {}",
        path.display().to_string().blue(),
        name.underline()
    ));

    let existing = context.registry.get(name).map(Path::to_path_buf);
    let watch = match existing {
        Some(existing) if existing != path && !force => {
            print_warning(&format!(
                "There is a watch \"{name}\" which watches \"{}\" (use --force to overwrite)",
                existing.display()
            ));
            return Ok(());
        }
        Some(_) => context.registry.replace(name, &path, &context.factory)?,
        None => context.registry.add(name, &path, &context.factory)?,
    };

    println!("  Type: {}", watch.kind().cyan());
    print_success(&format!("Added {name} to watch list"));
    Ok(())
}
