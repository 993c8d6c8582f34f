//! Run the standard scenario suite.

use anyhow::{bail, Context, Result};
use apicheck_core::{run_suite, standard_suite, ScenarioResult};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Run every standard scenario (or those matching `only`) against the target.
pub async fn run(
    config_path: &Path,
    base_url: Option<&str>,
    only: Option<&str>,
    verbose: bool,
) -> Result<()> {
    let config = super::load_config(config_path, base_url)?;
    let client = super::client(&config)?;

    let scenarios: Vec<_> = standard_suite(&config.suite)
        .into_iter()
        .filter(|s| only.map_or(true, |needle| s.name().contains(needle)))
        .collect();
    if scenarios.is_empty() {
        bail!("No scenario matches {:?}", only.unwrap_or_default());
    }

    println!(
        "Running {} scenarios against {}",
        style(scenarios.len()).cyan(),
        style(client.base_url()).cyan()
    );

    let pb = ProgressBar::new(scenarios.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let report = run_suite(&client, &config, scenarios, |result| {
        pb.inc(1);
        pb.set_message(result.name.clone());
        pb.println(line_for(result, verbose));
    })
    .await
    .context("Could not establish a session for the run")?;

    pb.finish_and_clear();

    println!();
    if let Some(email) = &report.user_email {
        println!("Authenticated as {}", email);
    }
    if report.all_passed() {
        println!(
            "{} {}",
            style("✓").green(),
            style(format!("{} scenarios passed", report.passed())).green()
        );
        Ok(())
    } else {
        println!(
            "{} {} passed, {} failed",
            style("×").red(),
            report.passed(),
            style(report.failed()).red().bold()
        );
        bail!("{} scenario(s) failed", report.failed())
    }
}

fn line_for(result: &ScenarioResult, verbose: bool) -> String {
    if result.passed() {
        return format!("  {} {}", style("✓").green(), result.name);
    }

    let mut line = format!(
        "  {} {}: {}",
        style("×").red(),
        result.name,
        result
            .error
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "unknown error".to_string())
    );
    if let Some(hint) = result.error.as_ref().and_then(|e| e.recovery_suggestion()) {
        line.push_str(&format!("\n      {}", style(hint).yellow()));
    }
    if verbose {
        if let Some(summary) = result.failure_summary() {
            line.push_str(&format!("\n      {}", style(summary).dim()));
        }
    }
    line
}
