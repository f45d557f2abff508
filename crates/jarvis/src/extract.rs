//! Parameter extraction
//!
//! Two strategies recover an argument from a matched command:
//! strip-literal removes a known trigger and keeps what is left, and
//! structured-prefix captures whatever follows one of a fixed set of verbs.
//! Both run on the original text so the argument keeps its casing.

use regex::Regex;

/// Schemes that count as already present on a URL
const URL_SCHEMES: &[&str] = &["http://", "https://"];

/// Leading-verb pattern: `^(?:verb1|verb2)\s+(.+)$`, case-insensitive
#[derive(Debug, Clone)]
pub struct VerbPattern {
    verbs: Vec<String>,
    regex: Regex,
}

impl VerbPattern {
    pub fn new<I, S>(verbs: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let verbs: Vec<String> = verbs.into_iter().map(Into::into).collect();
        let alternation = verbs
            .iter()
            .map(|verb| regex::escape(verb))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&format!(r"(?i)^(?:{})\s+(.+)$", alternation))?;
        Ok(Self { verbs, regex })
    }

    pub fn verbs(&self) -> &[String] {
        &self.verbs
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.capture(text).is_some()
    }

    /// Text after the verb, trimmed; `None` when no verb leads the text
    pub fn capture<'a>(&self, text: &'a str) -> Option<&'a str> {
        let captured = self.regex.captures(text)?.get(1)?.as_str().trim();
        (!captured.is_empty()).then_some(captured)
    }
}

/// Remove the first case-insensitive occurrence of `literal` and trim.
///
/// Returns an empty string when the literal is absent; callers treat that as
/// a missing parameter.
pub fn strip_literal(text: &str, literal: &str) -> String {
    if literal.is_empty() {
        return text.trim().to_string();
    }

    match find_ignore_ascii_case(text, literal) {
        Some(start) => {
            let end = start + literal.len();
            format!("{}{}", &text[..start], &text[end..])
                .trim()
                .to_string()
        }
        None => String::new(),
    }
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack.char_indices().map(|(i, _)| i).find(|&i| {
        haystack
            .get(i..i + needle.len())
            .is_some_and(|window| window.eq_ignore_ascii_case(needle))
    })
}

/// Prefix `default_scheme` unless the URL already carries http(s)
pub fn normalize_url(raw: &str, default_scheme: &str) -> String {
    let raw = raw.trim();
    let lower = raw.to_ascii_lowercase();
    if URL_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        raw.to_string()
    } else {
        format!("{}{}", default_scheme, raw)
    }
}
