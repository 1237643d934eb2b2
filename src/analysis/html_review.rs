use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

pub const NO_EDITOR_CONTEXT_FINDING: &str = "No editor context was received for analysis.";
pub const NO_CODE_FOUND_FINDING: &str = "No HTML code was found in the editor context.";

const SEMANTIC_ELEMENTS: &[&str] = &[
    "header", "nav", "main", "section", "article", "aside", "footer",
];
const HEADING_ELEMENTS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<\s*([a-zA-Z][a-zA-Z0-9]*)([^>]*)>").expect("TAG_PATTERN is a valid regex")
});
static COMMENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("COMMENT_PATTERN is a valid regex"));
static TITLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("TITLE_PATTERN is a valid regex")
});
static BODY_CLOSE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</\s*body").expect("BODY_CLOSE_PATTERN is a valid regex"));
static LANG_ATTR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\blang\s*=").expect("LANG_ATTR_PATTERN is a valid regex"));
static ALT_ATTR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\balt\s*=").expect("ALT_ATTR_PATTERN is a valid regex"));
static FENCED_CODE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[a-zA-Z]*[ \t]*\r?\n?(.*?)```")
        .expect("FENCED_CODE_PATTERN is a valid regex")
});
static CODE_LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)current code[^:\n]*:").expect("CODE_LABEL_PATTERN is a valid regex")
});
static NEXT_LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^(?:activity instructions|previous feedback)[^:\n]*:")
        .expect("NEXT_LABEL_PATTERN is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingStatus {
    Found,
    Missing,
    Warning,
    Note,
}

impl FindingStatus {
    fn glyph(&self) -> &'static str {
        match self {
            FindingStatus::Found => "✓",
            FindingStatus::Missing => "✗",
            FindingStatus::Warning => "!",
            FindingStatus::Note => "•",
        }
    }
}

/// One labeled line of analyzer output describing a structural property
/// detected (or missing) in the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub status: FindingStatus,
    pub message: String,
}

impl Finding {
    fn found(message: impl Into<String>) -> Self {
        Finding {
            status: FindingStatus::Found,
            message: message.into(),
        }
    }

    fn missing(message: impl Into<String>) -> Self {
        Finding {
            status: FindingStatus::Missing,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Finding {
            status: FindingStatus::Warning,
            message: message.into(),
        }
    }

    fn note(message: impl Into<String>) -> Self {
        Finding {
            status: FindingStatus::Note,
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.glyph(), self.message)
    }
}

struct TagHit {
    name: String,
    attrs: String,
    end: usize,
}

/// Lightly parsed tag-position index. One tolerant pass collects every
/// opening-tag occurrence; the structural checks are small predicates over
/// the collected hits, so malformed markup degrades to fewer hits instead
/// of a parse failure.
struct MarkupIndex {
    hits: Vec<TagHit>,
}

impl MarkupIndex {
    fn scan(source: &str) -> Self {
        let hits = TAG_PATTERN
            .captures_iter(source)
            .filter_map(|caps| {
                let full = caps.get(0)?;
                let name = caps.get(1)?.as_str().to_lowercase();
                let attrs = caps.get(2).map(|m| m.as_str()).unwrap_or("").to_string();
                Some(TagHit {
                    name,
                    attrs,
                    end: full.end(),
                })
            })
            .collect();
        Self { hits }
    }

    fn has(&self, name: &str) -> bool {
        self.hits.iter().any(|hit| hit.name == name)
    }

    fn has_any(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.has(name))
    }

    fn first(&self, name: &str) -> Option<&TagHit> {
        self.hits.iter().find(|hit| hit.name == name)
    }

    fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a TagHit> {
        self.hits.iter().filter(move |hit| hit.name == name)
    }
}

/// Run the structural checklist over an editor-context block.
///
/// The markup fragment is located first (fenced code block, or text after a
/// "current code" label); when nothing can be located the result is a
/// single explanatory finding. This never fails, whatever the input.
pub fn review_editor_context(context: &str) -> Vec<Finding> {
    if context.trim().is_empty() {
        return vec![Finding::note(NO_EDITOR_CONTEXT_FINDING)];
    }

    match extract_code_fragment(context) {
        Some(fragment) => analyze_markup(&fragment),
        None => vec![Finding::note(NO_CODE_FOUND_FINDING)],
    }
}

fn extract_code_fragment(context: &str) -> Option<String> {
    if let Some(caps) = FENCED_CODE_PATTERN.captures(context) {
        let inner = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
        if !inner.is_empty() {
            return Some(inner.to_string());
        }
    }

    if let Some(label) = CODE_LABEL_PATTERN.find(context) {
        let rest = &context[label.end()..];
        let rest = match NEXT_LABEL_PATTERN.find(rest) {
            Some(next) => &rest[..next.start()],
            None => rest,
        };
        let rest = rest.trim();
        if !rest.is_empty() {
            return Some(rest.to_string());
        }
    }

    None
}

/// Produce the ordered finding sequence for a markup fragment.
///
/// Detection is structural-pattern matching, not full parsing; a missing
/// section short-circuits its dependent sub-checks. The output always ends
/// with a character-count summary line.
pub fn analyze_markup(html: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    let index = MarkupIndex::scan(html);
    let lowered = html.to_lowercase();

    if lowered.contains("<!doctype") {
        findings.push(Finding::found("Doctype declaration is present"));
    } else {
        findings.push(Finding::missing("Missing <!DOCTYPE html> declaration"));
    }

    match index.first("html") {
        Some(hit) => {
            findings.push(Finding::found("Root <html> element is present"));
            if LANG_ATTR_PATTERN.is_match(&hit.attrs) {
                findings.push(Finding::found("The <html> element declares a lang attribute"));
            } else {
                findings.push(Finding::warning("The <html> element has no lang attribute"));
            }
        }
        None => findings.push(Finding::missing("No <html> root element found")),
    }

    if index.has("head") {
        findings.push(Finding::found("A <head> section is present"));
        match TITLE_PATTERN.captures(html) {
            Some(caps) => {
                let title = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
                if title.is_empty() {
                    findings.push(Finding::warning("The <title> element is empty"));
                } else {
                    findings.push(Finding::found(format!("The page title is set (\"{}\")", title)));
                }
            }
            None => findings.push(Finding::missing("No <title> element inside <head>")),
        }
    } else {
        findings.push(Finding::missing("No <head> section found"));
    }

    match body_content(html, &index) {
        Some(body) => {
            findings.push(Finding::found("A <body> section is present"));
            let visible = COMMENT_PATTERN.replace_all(body, "");
            if visible.trim().is_empty() {
                findings.push(Finding::note("The <body> has no content yet"));
            } else {
                findings.extend(content_findings(&visible));
            }
        }
        None => findings.push(Finding::missing("No <body> section found")),
    }

    if index.has("br") {
        findings.push(Finding::note(
            "Line breaks (<br>) are used; consider CSS margins for spacing",
        ));
    }

    findings.push(Finding::note(format!(
        "Analyzed {} characters of HTML",
        html.chars().count()
    )));

    findings
}

fn body_content<'a>(html: &'a str, index: &MarkupIndex) -> Option<&'a str> {
    let start = index.first("body")?.end;
    let rest = &html[start..];
    match BODY_CLOSE_PATTERN.find(rest) {
        Some(close) => Some(&rest[..close.start()]),
        None => Some(rest),
    }
}

fn content_findings(body: &str) -> Vec<Finding> {
    let index = MarkupIndex::scan(body);
    let mut findings = Vec::new();

    if index.has_any(HEADING_ELEMENTS) {
        findings.push(Finding::found("Heading elements are used"));
    } else {
        findings.push(Finding::warning("No heading elements (<h1> to <h6>) found"));
    }

    if index.has("p") {
        findings.push(Finding::found("Paragraph elements are used"));
    } else {
        findings.push(Finding::note("No <p> paragraph elements found"));
    }

    let mut images = index.all("img").peekable();
    if images.peek().is_some() {
        if images.any(|img| ALT_ATTR_PATTERN.is_match(&img.attrs)) {
            findings.push(Finding::found("Has image with alt text"));
        } else {
            findings.push(Finding::warning("Image missing alt attribute"));
        }
    }

    if index.has_any(&["ul", "ol"]) {
        findings.push(Finding::found("List elements are used"));
    }
    if index.has("table") {
        findings.push(Finding::found("A table is used"));
    }
    if index.has("form") {
        findings.push(Finding::found("A form is present"));
    }

    let semantic: Vec<&str> = SEMANTIC_ELEMENTS
        .iter()
        .copied()
        .filter(|element| index.has(element))
        .collect();
    if semantic.is_empty() {
        findings.push(Finding::note("No semantic sectioning elements found"));
    } else {
        findings.push(Finding::found(format!(
            "Semantic elements found: {}",
            semantic.join(", ")
        )));
    }

    findings
}
