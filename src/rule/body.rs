/// What a rule looks for in each candidate file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Literal substring, reported once per line it occurs on
    Literal(String),
    /// Regular expression, reported once per file it matches
    Regex(String),
}

/// A fixed lint check: which files to read, what to look for, what to say
#[derive(Debug, Clone)]
pub struct RuleBody {
    /// Subcommand name, also used as the check name in reports
    pub name: String,
    /// Human-readable description shown in logs
    pub description: String,
    /// Glob patterns (relative to the scan root) of files this rule reads
    pub scope: Vec<String>,
    pub pattern: Pattern,
    /// Detail attached to line-level violations
    pub message: String,
    /// First line written when violations are found
    pub header: String,
    /// Remediation hint written after the violation list
    pub tip: String,
    /// Line written when nothing is found
    pub success: String,
}

impl RuleBody {
    pub fn deprecated_query_get() -> Self {
        Self {
            name: "query-get".into(),
            description: "Flag legacy Model.query.get(id) lookups".into(),
            scope: vec!["**/*.py".into()],
            pattern: Pattern::Literal(".query.get(".into()),
            message: "deprecated Query.get usage".into(),
            header: "Deprecated Query.get usage found:".into(),
            tip: "Refactor to db.session.get(Model, id) before committing.".into(),
            success: "No deprecated Query.get usage found.".into(),
        }
    }

    pub fn inline_styles() -> Self {
        Self {
            name: "inline-styles".into(),
            description: "Flag style=\"...\" attributes in templates".into(),
            scope: vec!["**/*.html".into()],
            pattern: Pattern::Regex(r#"(?i)style\s*=\s*["']"#.into()),
            message: "inline style attribute".into(),
            header: "Inline styles found in templates:".into(),
            tip: "Move inline styles into a stylesheet before committing.".into(),
            success: "No inline styles found.".into(),
        }
    }

    pub fn manual_cache_busting() -> Self {
        Self {
            name: "cache-bust".into(),
            description: "Flag hand-written ?v=<timestamp> asset tokens".into(),
            scope: vec!["**/*.html".into()],
            pattern: Pattern::Regex(r"\?v=\d{6,}".into()),
            message: "manual cache-busting token".into(),
            header: "Manual cache-busting tokens found:".into(),
            tip: "Remove hard-coded ?v= tokens and let asset versioning handle cache busting."
                .into(),
            success: "No manual cache-busting tokens found.".into(),
        }
    }

    /// The lint checks run by `all`, in order
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::deprecated_query_get(),
            Self::inline_styles(),
            Self::manual_cache_busting(),
        ]
    }
}
