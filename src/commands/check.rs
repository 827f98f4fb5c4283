use crate::core::{
    check::{Checker, ProgressEvent},
    colors::{get_colored_result, get_result_color_style},
    command_init::CommandContext,
    error::Result,
    output::{finish_progress, print_hint, print_progress},
    print_info, print_section_header, print_success, print_warning,
    state::{CheckEntry, CheckReport, CheckResult, Section},
};
use colored::*;
use std::io::IsTerminal;
use std::thread;

/// Check the selected repos and print the report, as text or as JSON
pub fn execute_check(
    context: &CommandContext,
    include: Option<&str>,
    exclude: Option<&str>,
    json: bool,
) -> Result<()> {
    let records = context.filtered_records(include, exclude)?;
    if json {
        let report = Checker::new(context.settings.check_config()).run(records, None);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    if records.is_empty() {
        print_warning("No repos found");
        return Ok(());
    }

    print_info(&format!("Checking {} repos", records.len().to_string().blue().bold()));
    let show_progress = context.settings.show_progress() && std::io::stderr().is_terminal();
    let checker = Checker::new(context.settings.check_config());
    let (progress, events) = crossbeam::channel::unbounded::<ProgressEvent>();

    let report = thread::scope(|scope| {
        let consumer = scope.spawn(move || {
            for event in events.iter() {
                if show_progress {
                    print_progress(event.completed, event.total, &event.name);
                }
            }
            if show_progress {
                finish_progress();
            }
        });
        let report = checker.run(records, Some(progress));
        let _ = consumer.join();
        report
    });

    render_report(&report);
    Ok(())
}

/// Print the non-empty buckets in fixed order, or the all-in-sync summary
pub fn render_report(report: &CheckReport) {
    if report.all_in_sync() {
        print_success("All is in sync!");
        return;
    }

    for (section, entries) in report.sections() {
        print_section_header(entries.len(), section.title());
        if let Some(hint) = section.hint() {
            print_hint(hint);
        }
        for entry in entries {
            println!("{}", entry_line(section, entry));
        }
    }
    println!(
        "\n {} {} {}",
        format!("{} of {} repos", report.unchanged, report.total).bright_black(),
        get_colored_result(CheckResult::Unchanged),
        format!(
            "checked in {:.1}s",
            report.elapsed().num_milliseconds() as f64 / 1000.0
        )
        .bright_black()
    );
}

/// One report line, the name colored by its classification
fn entry_line(section: Section, entry: &CheckEntry) -> String {
    let style = get_result_color_style(entry.result);
    let name = style(&entry.name).bold();
    match section {
        Section::Errors => format!(
            "  {}: {}",
            name,
            entry.error.as_deref().unwrap_or("unknown error").red()
        ),
        _ => format!(
            "  {} ({}): {}",
            name,
            entry.kind,
            entry.path.display().to_string().yellow()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(name: &str, result: CheckResult, error: Option<&str>) -> CheckEntry {
        CheckEntry {
            name: name.to_string(),
            path: PathBuf::from(format!("/work/{name}")),
            kind: "Git".to_string(),
            result,
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_entry_line_for_errors_shows_message() {
        let line = entry_line(
            Section::Errors,
            &entry("gone", CheckResult::Error, Some("No implementation found to watch /work/gone")),
        );
        assert!(line.contains("gone"));
        assert!(line.contains("No implementation found to watch /work/gone"));
        assert!(!line.contains("(Git)"));
    }

    #[test]
    fn test_entry_line_shows_kind_and_path() {
        let line = entry_line(Section::Ahead, &entry("api", CheckResult::Ahead, None));
        assert!(line.contains("api"));
        assert!(line.contains("(Git)"));
        assert!(line.contains("/work/api"));
    }
}
