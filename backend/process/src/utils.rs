use std::sync::LazyLock;

use catalog::admin::FACET_SEPARATOR;
use regex::Regex;

static UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());
static CONTROL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Cc}\p{Cf}&&[^\s]]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Label as shown in filters: single spaces, no control or bidi marks.
///
/// Letters of any script are kept, so Arabic labels survive untouched.
pub fn sanitize(input: &str) -> String {
    let s = UNDERSCORES.replace_all(input, " ");
    let s = CONTROL.replace_all(&s, "");

    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

/// `None` when nothing is left after sanitizing.
pub fn sanitize_label(label: Option<String>) -> Option<String> {
    label.map(|label| sanitize(&label)).filter(|label| !label.is_empty())
}

/// Like [`sanitize_label`], commas become spaces so the products page can select the value.
pub fn sanitize_facet(label: Option<String>) -> Option<String> {
    sanitize_label(label.map(|label| label.replace(FACET_SEPARATOR, " ")))
}

pub fn trim_text(text: Option<String>) -> Option<String> {
    text.map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
