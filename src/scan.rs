pub mod matcher;
pub mod walker;

use crate::rule::body::RuleBody;
use crate::types::{ScanResult, Violation};
use matcher::{Hit, Matcher};
use std::fs;
use std::path::Path;
use tracing::{debug, info, trace};
use walker::TreeWalker;

/// Walk `root`, match every in-scope file against `rule` and collect violations.
///
/// Unreadable or non-UTF-8 files are treated as empty. Only an invalid root
/// or an invalid rule pattern is an error.
pub fn scan(rule: &RuleBody, root: &Path, exclude_dirs: &[String]) -> anyhow::Result<ScanResult> {
    let walker = TreeWalker::new(root, &rule.scope, exclude_dirs)?;
    let matcher = Matcher::new(&rule.pattern)?;
    debug!("Running '{}' under {}", rule.name, root.display());

    let mut result = ScanResult::new(&rule.name);
    let mut scanned = 0usize;
    for path in walker.files() {
        scanned += 1;
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                debug!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        let file = walker.relative(&path);
        match matcher.find(&content) {
            Some(Hit::Lines(lines)) => {
                trace!("{} matched on lines {:?}", file, lines);
                result.violations.extend(
                    lines
                        .into_iter()
                        .map(|line| Violation::line(file.as_str(), line, rule.message.as_str())),
                );
            }
            Some(Hit::File) => {
                trace!("{} matched", file);
                result.violations.push(Violation::file(file));
            }
            None => {}
        }
    }

    info!(
        "'{}' scanned {} files, {} violations",
        rule.name,
        scanned,
        result.violations.len()
    );
    Ok(result)
}
