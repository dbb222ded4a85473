use crate::rule::body::Pattern;
use anyhow::Context;
use regex::Regex;

/// Compiled form of a rule pattern
#[derive(Debug, Clone)]
pub enum Matcher {
    Literal(String),
    Regex(Regex),
}

/// Where a pattern matched within one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    /// 1-indexed line numbers, ascending
    Lines(Vec<usize>),
    File,
}

impl Matcher {
    pub fn new(pattern: &Pattern) -> anyhow::Result<Self> {
        match pattern {
            Pattern::Literal(s) => Ok(Self::Literal(s.clone())),
            Pattern::Regex(s) => Regex::new(s)
                .map(Self::Regex)
                .with_context(|| format!("Invalid regex '{}'", s)),
        }
    }

    /// Match file content, returning `None` when nothing matched
    pub fn find(&self, content: &str) -> Option<Hit> {
        match self {
            Self::Literal(needle) => {
                // Whole-file check first, most files never reach the line scan
                if !content.contains(needle.as_str()) {
                    return None;
                }
                Some(Hit::Lines(matching_lines(content, needle)))
            }
            Self::Regex(regex) => regex.is_match(content).then_some(Hit::File),
        }
    }
}

fn matching_lines(content: &str, needle: &str) -> Vec<usize> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| line.contains(needle))
        .map(|(index, _)| index + 1)
        .collect()
}
