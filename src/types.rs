use serde::Serialize;

/// A detected occurrence of a disallowed pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// File path, relative to the scan root
    pub file: String,
    /// Line number (1-indexed), absent for file-level matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Violation detail, absent for file-level matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Violation {
    pub fn file(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: None,
            message: None,
        }
    }

    pub fn line(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: Some(line),
            message: Some(message.into()),
        }
    }

    /// Render as `path` or `path:line: message`
    pub fn display_line(&self) -> String {
        match (self.line, &self.message) {
            (Some(line), Some(message)) => format!("{}:{}: {}", self.file, line, message),
            (Some(line), None) => format!("{}:{}", self.file, line),
            _ => self.file.clone(),
        }
    }
}

/// All violations found by one check during one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub check: String,
    pub violations: Vec<Violation>,
}

impl ScanResult {
    pub fn new(check: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            violations: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}
