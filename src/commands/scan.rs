use crate::core::{
    command_init::CommandContext,
    dirs::absolute_path,
    error::Result,
    filter::RepoFilter,
    output::{print_hint, prompt},
    print_info, print_success,
    scan::{consider, discover_directories, ScanVerdict},
};
use colored::*;
use std::path::Path;

pub struct ScanArgs<'a> {
    pub directory: &'a Path,
    pub max_depth: usize,
    pub include: Option<&'a str>,
    pub exclude: Option<&'a str>,
    pub prefix: &'a str,
    /// Register every candidate without asking
    pub yes: bool,
}

/// Scan a directory for repositories and register the accepted ones.
///
/// Every registration persists immediately, so stopping half way keeps what was added.
pub fn execute_scan(context: &mut CommandContext, args: ScanArgs<'_>) -> Result<()> {
    let filter = RepoFilter::new(args.include, args.exclude)?;
    let root = absolute_path(args.directory)?;
    print_info(&format!(
        "Scanning {} for repositories",
        root.display().to_string().blue().bold()
    ));

    let mut added = 0;
    for dir in discover_directories(&root, args.max_depth)? {
        let verdict = consider(&context.registry, &context.factory, &filter, &dir, args.prefix);
        let (mut name, kind) = match verdict {
            ScanVerdict::Watched(name) => {
                log::debug!("{} is already watched as {name}", dir.display());
                continue;
            }
            ScanVerdict::NotARepo(reason) => {
                log::debug!("{}: {reason}", dir.display());
                continue;
            }
            ScanVerdict::Filtered(name) => {
                println!("Considering directory {}", dir.display().to_string().white());
                print_hint(&format!("Does not pass the name filters: \"{name}\""));
                continue;
            }
            ScanVerdict::Candidate { name, kind } => (name, kind),
        };

        println!("Considering {} directory {}", kind.cyan(), dir.display().to_string().white());
        if !args.yes {
            match ask_name(context, &name)? {
                Answer::Add(chosen) => name = chosen,
                Answer::Skip => {
                    print_hint("Not added");
                    continue;
                }
                Answer::Stop => {
                    print_hint("Input closed, stopping scan");
                    break;
                }
            }
        }

        match context.registry.add(&name, &dir, &context.factory) {
            Ok(_) => {
                println!("  {} {} as {}", "Added".green(), dir.display(), name.white().bold());
                added += 1;
            }
            Err(e) => println!("  {} {}", "Failed to add:".red(), e),
        }
    }

    print_success(&format!("Added {added} repositories"));
    Ok(())
}

/// Decision of the user about one candidate
enum Answer {
    Add(String),
    Skip,
    /// Stdin is closed, nobody is left to ask
    Stop,
}

fn ask_name(context: &CommandContext, suggested: &str) -> Result<Answer> {
    loop {
        let Some(answer) = prompt(&format!("  Add as \"{suggested}\"? (y=yes, n=no, r=rename)"))? else {
            return Ok(Answer::Stop);
        };
        match answer.to_lowercase().as_str() {
            "y" | "yes" => return Ok(Answer::Add(suggested.to_string())),
            "n" | "no" => return Ok(Answer::Skip),
            "r" | "rename" => loop {
                let Some(chosen) = prompt(&format!("  Name ({suggested}):"))? else {
                    return Ok(Answer::Stop);
                };
                if chosen.is_empty() {
                    return Ok(Answer::Add(suggested.to_string()));
                }
                match context.registry.get(&chosen) {
                    Some(path) => println!(
                        "  {}",
                        format!(
                            "Name \"{chosen}\" already in use for directory \"{}\". Choose something else!",
                            path.display()
                        )
                        .yellow()
                    ),
                    None => return Ok(Answer::Add(chosen)),
                }
            },
            _ => continue,
        }
    }
}
