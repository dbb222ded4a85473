use crate::rule::body::RuleBody;
use crate::types::ScanResult;

/// Diagnostic block for a check with violations: header, one line each, tip
pub fn format_violations(rule: &RuleBody, result: &ScanResult) -> String {
    let mut output = String::new();
    output.push_str(&rule.header);
    output.push('\n');
    for violation in &result.violations {
        output.push_str(&violation.display_line());
        output.push('\n');
    }
    output.push_str(&rule.tip);
    output.push('\n');
    output
}

/// Markdown rendering of several checks, used for `--output *.md`
pub fn format_markdown(runs: &[(&RuleBody, &ScanResult)]) -> String {
    let mut output = String::new();
    for (rule, result) in runs {
        output.push_str(&format!("# Check: {}\n\n", rule.name));
        if result.is_clean() {
            output.push_str(&format!("{}\n\n", rule.success));
            continue;
        }
        output.push_str(&format!("{}\n\n", rule.header));
        for violation in &result.violations {
            output.push_str(&format!("- `{}`\n", violation.display_line()));
        }
        output.push_str(&format!("\n**Tip:** {}\n\n", rule.tip.trim()));
    }
    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Violation;

    #[test]
    fn test_format_violations_line_level() {
        let rule = RuleBody::deprecated_query_get();
        let mut result = ScanResult::new(&rule.name);
        result
            .violations
            .push(Violation::line("app/routes.py", 5, &rule.message));

        assert_eq!(
            format_violations(&rule, &result),
            "Deprecated Query.get usage found:\n\
             app/routes.py:5: deprecated Query.get usage\n\
             Refactor to db.session.get(Model, id) before committing.\n"
        );
    }

    #[test]
    fn test_format_violations_file_level() {
        let rule = RuleBody::inline_styles();
        let mut result = ScanResult::new(&rule.name);
        result.violations.push(Violation::file("templates/a.html"));
        result.violations.push(Violation::file("templates/b.html"));

        let text = format_violations(&rule, &result);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Inline styles found in templates:");
        assert_eq!(lines[1], "templates/a.html");
        assert_eq!(lines[2], "templates/b.html");
        assert_eq!(lines[3], rule.tip);
    }

    #[test]
    fn test_format_markdown_mixed() {
        let query_get = RuleBody::deprecated_query_get();
        let clean = ScanResult::new(&query_get.name);
        let cache_bust = RuleBody::manual_cache_busting();
        let mut dirty = ScanResult::new(&cache_bust.name);
        dirty.violations.push(Violation::file("templates/base.html"));

        let md = format_markdown(&[(&query_get, &clean), (&cache_bust, &dirty)]);
        assert!(md.starts_with("# Check: query-get\n\nNo deprecated Query.get usage found."));
        assert!(md.contains("# Check: cache-bust\n\nManual cache-busting tokens found:"));
        assert!(md.contains("- `templates/base.html`"));
        assert!(md.ends_with(&format!("**Tip:** {}", cache_bust.tip)));
    }
}
