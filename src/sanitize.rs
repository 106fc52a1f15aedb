use crate::filter::parse_number;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Node};

/// UK outward code, e.g. `BR1`, `SW1A`
static OUTWARD_POSTCODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[A-Z]{1,2}[0-9]{1,2}[A-Z]?$").unwrap());

/// Characters that survive tag stripping but are still HTML-significant
static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>'"]"#).unwrap());

/// Strip markup and quote characters from free-text search input.
///
/// The input is parsed as an HTML fragment so that tags disappear and the
/// bodies of script/style elements are dropped entirely. Whatever is left has
/// `<`, `>`, `'` and `"` removed and is trimmed.
pub fn sanitize_search_input(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(input);
    let mut text = String::with_capacity(input.len());

    for node in fragment.root_element().descendants() {
        let Node::Text(chunk) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| matches!(el.name(), "script" | "style"))
        });
        if !hidden {
            text.push_str(chunk);
        }
    }

    UNSAFE_CHARS.replace_all(&text, "").trim().to_string()
}

/// Escape HTML-significant characters for display
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Check a UK outward postcode such as `BR1` or `SW1A`; blank input is valid
pub fn validate_postcode(postcode: &str) -> bool {
    let code = postcode.trim();
    code.is_empty() || OUTWARD_POSTCODE.is_match(code)
}

/// Check a numeric input; blank input is valid, otherwise a non-negative number.
///
/// Accepts exactly what the numeric search fields keep as a bound.
pub fn validate_number(value: &str) -> bool {
    value.trim().is_empty() || parse_number(value).is_some()
}
