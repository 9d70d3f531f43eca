//! Human-readable rendering of a run.

use colored::Colorize;
use fork_purger_core::{RunMode, RunReport};

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

const BANNER: &str = r#"
 ___         _     ___
| __|__ _ _ | |__ | _ \_  _ _ _ __ _ ___ _ _
| _/ _ \ '_|| / / |  _/ || | '_/ _` / -_) '_|
|_|\___/_|  |_\_\ |_|  \_,_|_| \__, \___|_|
                               |___/
"#;

pub const DRY_RUN_HEADING: &str = "These forks will be deleted:";
pub const EXECUTE_HEADING: &str = "Deleting forked repos:";

/// The greeting printed before a run starts.
pub fn banner() -> String {
    format!("{}\n", BANNER.bright_cyan().bold())
}

/// The heading that introduces the report for `mode`.
pub fn heading(mode: RunMode) -> String {
    let text = match mode {
        RunMode::DryRun => DRY_RUN_HEADING,
        RunMode::Execute => EXECUTE_HEADING,
    };
    format!("{}\n", text.bold())
}

/// Formats a completed run: one line per fork and a summary line.
///
/// The heading is printed separately, before the run starts.
pub fn render_report(report: &RunReport) -> String {
    let mut output = String::new();

    match report {
        RunReport::Planned(targets) => {
            for target in targets {
                output.push_str(&format!("  {}\n", target.api_url));
            }
        }
        RunReport::Deleted(outcomes) => {
            for outcome in outcomes {
                if outcome.succeeded {
                    output.push_str(&format!("  {} {}\n", "✓".green(), outcome.target.api_url));
                } else {
                    output.push_str(&format!(
                        "  {} {}: {}\n",
                        "✗".red(),
                        outcome.target.api_url,
                        outcome.error_detail.as_deref().unwrap_or("unknown error").red()
                    ));
                }
            }
        }
    }

    output.push('\n');
    output.push_str(&summary(report));
    output.push('\n');
    output
}

fn summary(report: &RunReport) -> String {
    if report.is_empty() {
        return "No forked repositories found.".dimmed().to_string();
    }

    match report {
        RunReport::Planned(targets) => format!(
            "{} fork(s) would be deleted. Run again with --delete to delete them.",
            targets.len()
        ),
        RunReport::Deleted(_) if report.failed_count() == 0 => {
            format!("Deleted {} fork(s).", report.succeeded_count())
                .green()
                .to_string()
        }
        RunReport::Deleted(_) => format!(
            "Deleted {} of {} fork(s), {} failed.",
            report.succeeded_count(),
            report.len(),
            report.failed_count()
        )
        .yellow()
        .to_string(),
    }
}
