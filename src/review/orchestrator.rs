use super::render;
use crate::rule::body::RuleBody;
use crate::scan;
use crate::types::ScanResult;
use anyhow::{Context, bail};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;

/// Overall result of a gate invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    Violations,
}

impl Outcome {
    /// Process exit status for this outcome
    pub fn code(self) -> u8 {
        match self {
            Self::Clean => EXIT_SUCCESS,
            Self::Violations => EXIT_FAILURE,
        }
    }
}

/// Run each rule over `root`, report to stdout/stderr and optionally a file.
///
/// Rules run in order and all of them run even when an earlier one fails.
pub fn run_checks(
    rules: &[RuleBody],
    root: &Path,
    exclude_dirs: &[String],
    output: Option<&str>,
) -> anyhow::Result<Outcome> {
    debug!("Excluding directories: {:?}", exclude_dirs);

    let mut results = Vec::with_capacity(rules.len());
    for rule in rules {
        info!("Running check '{}': {}", rule.name, rule.description);
        results.push(scan::scan(rule, root, exclude_dirs)?);
    }

    let runs: Vec<(&RuleBody, &ScanResult)> = rules.iter().zip(results.iter()).collect();
    let outcome = report(
        &runs,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )
    .context("Failed to write report")?;

    if let Some(output_path) = output {
        write_output(output_path, &runs)?;
    }

    Ok(outcome)
}

/// Write each check's success line to `out` or its diagnostics to `err`
pub fn report(
    runs: &[(&RuleBody, &ScanResult)],
    out: &mut impl Write,
    err: &mut impl Write,
) -> std::io::Result<Outcome> {
    let mut outcome = Outcome::Clean;
    for (rule, result) in runs {
        if result.is_clean() {
            writeln!(out, "{}", rule.success)?;
        } else {
            write!(err, "{}", render::format_violations(rule, result))?;
            outcome = Outcome::Violations;
        }
    }
    out.flush()?;
    err.flush()?;
    Ok(outcome)
}

fn write_output(path: &str, runs: &[(&RuleBody, &ScanResult)]) -> anyhow::Result<()> {
    let content = if path.ends_with(".json") {
        let results: Vec<&ScanResult> = runs.iter().map(|(_, result)| *result).collect();
        serde_json::to_string_pretty(&results)?
    } else if path.ends_with(".md") {
        render::format_markdown(runs)
    } else {
        bail!("Output file must end with .md or .json");
    };

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output file {}", path))?;
    info!("Results written to {}", path);
    Ok(())
}
