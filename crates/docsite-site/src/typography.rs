//! Text helpers shared by page templates.

use std::fmt::Write;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static ACRONYM_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").unwrap());
static CAMEL_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").unwrap());
static LAST_SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+(\S+)$").unwrap());
static TWO_WORDS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+\S+\s+\S+$").unwrap());
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap());

/// Window, in characters, the last two words must fit in for [`widont`].
const WIDONT_WINDOW: usize = 20;

/// Snake-case a constant or CamelCase name.
///
/// `Dry::Types` -> `dry/types`, `HTMLParser` -> `html_parser`,
/// `dry-types` -> `dry_types`.
#[must_use]
pub fn underscore(word: &str) -> String {
    let word = word.replace("::", "/");
    let word = ACRONYM_BOUNDARY_RE.replace_all(&word, "${1}_${2}");
    let word = CAMEL_BOUNDARY_RE.replace_all(&word, "${1}_${2}");
    word.replace('-', "_").to_lowercase()
}

/// Like [`underscore`] with dashes instead of underscores.
#[must_use]
pub fn dasherize(word: &str) -> String {
    underscore(word).replace('_', "-")
}

/// Join the last two words with `&nbsp;` to avoid a lone word on the final line.
///
/// Long text is left alone unless its last two words fit in the final
/// 20 characters.
#[must_use]
pub fn widont(text: &str) -> String {
    let len = text.chars().count();
    if len > WIDONT_WINDOW {
        let tail: String = text.chars().skip(len - WIDONT_WINDOW).collect();
        if !TWO_WORDS_RE.is_match(&tail) {
            return text.to_owned();
        }
    }
    LAST_SPACE_RE.replace(text, "&nbsp;${1}").into_owned()
}

/// Reformat a `dd/mm/yyyy` date with a strftime pattern.
///
/// Anything else, including impossible dates, is returned unchanged.
#[must_use]
pub fn format_date(value: &str, format: &str) -> String {
    if !DATE_RE.is_match(value) {
        return value.to_owned();
    }
    let Ok(date) = NaiveDate::parse_from_str(value, "%d/%m/%Y") else {
        return value.to_owned();
    };

    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        tracing::warn!(format, "Invalid date format");
        return value.to_owned();
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_underscore() {
        assert_eq!(underscore("Dry::Types"), "dry/types");
        assert_eq!(underscore("HTMLParser"), "html_parser");
        assert_eq!(underscore("dry-types"), "dry_types");
        assert_eq!(underscore("already_snake"), "already_snake");
    }

    #[test]
    fn test_dasherize() {
        assert_eq!(dasherize("DryTypes"), "dry-types");
        assert_eq!(dasherize("dry_struct"), "dry-struct");
    }

    #[test]
    fn test_widont_short_text() {
        assert_eq!(widont("Getting started"), "Getting&nbsp;started");
        assert_eq!(widont("Single"), "Single");
    }

    #[test]
    fn test_widont_long_text_with_short_tail() {
        assert_eq!(
            widont("Introducing the new dry-rb website"),
            "Introducing the new dry-rb&nbsp;website"
        );
    }

    #[test]
    fn test_widont_long_final_words_unchanged() {
        let text = "Announcing extraordinarily-long-identifiers everywhere";
        assert_eq!(widont(text), text);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("17/10/2026", "%B %-d, %Y"), "October 17, 2026");
        assert_eq!(format_date("2026-10-17", "%B %-d, %Y"), "2026-10-17");
        assert_eq!(format_date("31/02/2026", "%B %-d, %Y"), "31/02/2026");
    }
}
