use crate::error::ParseError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// AliasDefinition
// ---------------------------------------------------------------------------

/// One `name=template` line from a definition source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasDefinition {
    pub name: String,
    /// Replacement text, verbatim, including any embedded quoting.
    pub template: String,
    /// 1-based source line the definition came from.
    pub line: usize,
}

impl AliasDefinition {
    /// First whitespace-delimited word of the template, if any.
    pub fn leading_token(&self) -> Option<&str> {
        leading_token(&self.template)
    }
}

pub fn leading_token(s: &str) -> Option<&str> {
    s.split_whitespace().next()
}

// ---------------------------------------------------------------------------
// Name validation
// ---------------------------------------------------------------------------

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn name_re() -> &'static Regex {
    NAME_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.]+$").unwrap())
}

pub fn is_valid_name(name: &str) -> bool {
    name_re().is_match(name)
}

// ---------------------------------------------------------------------------
// Line parsing
// ---------------------------------------------------------------------------

/// A line is either skipped (blank or `#` comment) or a definition.
pub fn is_ignored(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Parse a single non-ignored line. `line_no` is 1-based.
pub fn parse_line(line_no: usize, raw: &str) -> Result<AliasDefinition, ParseError> {
    let fail = |reason: &str| ParseError {
        line: line_no,
        content: raw.to_string(),
        reason: reason.to_string(),
    };

    let Some((name, template)) = raw.trim_start().split_once('=') else {
        return Err(fail("missing '='"));
    };
    let name = name.trim_end();
    if name.is_empty() {
        return Err(fail("empty alias name"));
    }
    if !is_valid_name(name) {
        return Err(fail("alias name must match [A-Za-z0-9_.]+"));
    }

    Ok(AliasDefinition {
        name: name.to_string(),
        template: template.to_string(),
        line: line_no,
    })
}

/// Parse every line of `source`, in order. Ignored lines produce nothing;
/// malformed lines produce an `Err` entry so the caller can apply its policy.
pub fn parse_source(source: &str) -> Vec<Result<AliasDefinition, ParseError>> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !is_ignored(line))
        .map(|(i, line)| parse_line(i + 1, line))
        .collect()
}
