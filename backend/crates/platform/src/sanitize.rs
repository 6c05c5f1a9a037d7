//! Input Sanitization
//!
//! Pattern-based, best-effort filtering of user-supplied text. This is not
//! an HTML sanitizer and not an injection defence: it strips the obvious
//! markup vectors and rejects text that looks like SQL or script payloads.
//! Storage and rendering layers must still escape/parameterize.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use serde::{Deserialize, Serialize};

/// Upper bound for numeric form fields
pub const MAX_FORM_NUMBER: f64 = 999_999.0;

static ANGLE_BRACKETS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[<>]").expect("angle bracket pattern"));
static JAVASCRIPT_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)javascript:").expect("javascript scheme pattern"));
static EVENT_HANDLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)on(?-u:\w)+=").expect("event handler pattern"));

static DANGEROUS_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r#"['";]"#,
        r"(?i)union\s+select",
        r"(?i)insert\s+into",
        r"(?i)delete\s+from",
        r"(?i)drop\s+table",
        r"(?i)script",
        r"(?i)eval\s*\(",
    ])
    .expect("dangerous input patterns")
});

/// Strip `<`/`>`, `javascript:` and inline `on…=` handlers, then trim.
pub fn sanitize_input(input: &str) -> String {
    let text = ANGLE_BRACKETS.replace_all(input, "");
    let text = JAVASCRIPT_SCHEME.replace_all(&text, "");
    let text = EVENT_HANDLER.replace_all(&text, "");
    text.trim().to_string()
}

/// `false` if the text contains quotes, `;`, SQL verbs, `script` or `eval(`.
///
/// False negatives are expected.
pub fn is_valid_input(input: &str) -> bool {
    !DANGEROUS_PATTERNS.is_match(input)
}

/// A single submitted form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

/// Sanitize text fields and clamp numbers into `0..=MAX_FORM_NUMBER`.
pub fn sanitize_form_data(data: BTreeMap<String, FormValue>) -> BTreeMap<String, FormValue> {
    data.into_iter()
        .map(|(key, value)| {
            let cleaned = match value {
                FormValue::Text(text) => FormValue::Text(sanitize_input(&text)),
                FormValue::Number(n) => FormValue::Number(n.clamp(0.0, MAX_FORM_NUMBER)),
                other => other,
            };
            (key, cleaned)
        })
        .collect()
}
