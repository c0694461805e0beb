//! Structural SVG lint.
//!
//! Catches the mistakes that break rendering in the host but slip past a
//! visual check: repeated attributes on one element (which XML forbids),
//! a missing root, and tags that never close. Not a validator. Anything
//! it doesn't flag may still be wrong.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static START_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([A-Za-z][\w:.-]*)((?:\s+[^>]*)?)/?>").expect("start tag regex")
});

// Name plus its quoted value, so `=` inside a value is never read as
// another attribute.
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][\w:.-]*)\s*=\s*(?:"[^"]*"|'[^']*')"#).expect("attribute regex")
});

/// One lint finding. `line` is 1-based; `None` means the whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub line: Option<usize>,
    pub message: String,
}

impl Finding {
    fn at(line: usize, message: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            message: message.into(),
        }
    }

    fn document(message: impl Into<String>) -> Self {
        Self {
            line: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Errors make the document unusable; warnings are worth a look.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl LintReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// 1-based line number of byte offset `pos`.
fn line_of(text: &str, pos: usize) -> usize {
    text[..pos].bytes().filter(|&b| b == b'\n').count() + 1
}

/// Lint SVG markup.
#[must_use]
pub fn lint_svg(svg: &str) -> LintReport {
    let mut report = LintReport::default();

    for caps in START_TAG.captures_iter(svg) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let attrs = caps.get(2).map_or("", |m| m.as_str());

        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for attr in ATTRIBUTE.captures_iter(attrs) {
            let Some(attr_name) = attr.get(1).map(|m| m.as_str()) else {
                continue;
            };
            let count = counts.entry(attr_name).or_insert(0);
            *count += 1;
            if *count == 2 {
                order.push(attr_name);
            }
        }
        let line = line_of(svg, whole.start());
        for dup in order {
            report.errors.push(Finding::at(
                line,
                format!("duplicate '{dup}' attribute on <{}>", name.as_str()),
            ));
        }
    }

    if !svg.contains("<svg") {
        report.errors.push(Finding::document("missing <svg> root element"));
    }
    if !svg.contains(r#"xmlns="http://www.w3.org/2000/svg""#) {
        report.warnings.push(Finding::document("missing SVG namespace declaration"));
    }
    if !svg.contains("viewBox") {
        report.warnings.push(Finding::document("missing viewBox attribute"));
    }

    for pos in unclosed_tags(svg) {
        report
            .warnings
            .push(Finding::at(line_of(svg, pos), "possibly unclosed tag"));
    }

    report
}

/// Byte offsets of `<` that reach another `<` (or the end) before a `>`.
/// Comments are skipped whole.
fn unclosed_tags(svg: &str) -> Vec<usize> {
    let mut found = Vec::new();
    let mut i = 0;
    while let Some(rel) = svg[i..].find('<') {
        let start = i + rel;
        let rest = &svg[start..];
        if rest.starts_with("<!--") {
            match rest.find("-->") {
                Some(end) => {
                    i = start + end + 3;
                    continue;
                }
                None => {
                    found.push(start);
                    break;
                }
            }
        }
        let close = rest[1..].find('>');
        let reopen = rest[1..].find('<');
        match (close, reopen) {
            (Some(c), Some(o)) if o < c => found.push(start),
            (None, _) => found.push(start),
            _ => {}
        }
        i = start + 1;
    }
    found
}
