//! Competitor names reduced to plain ASCII.
//!
//! WCA names often carry a native-script spelling in parentheses, e.g.
//! `Max Park (박현수)`. Those annotations are dropped and whatever remains is
//! transliterated so it lines up in a monospace table.

use deunicode::deunicode;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::data::CellValue;

/// Columns holding personal names (exact, case-sensitive match).
pub const NAME_FIELDS: &[&str] = &["name", "personName", "person_name", "competitorName"];

/// Innermost parenthesized group plus the whitespace right before it.
/// Full-width parentheses count too.
static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[(（][^()（）]*[)）]").expect("valid parenthetical pattern"));

/// Check if a column holds personal names.
pub fn is_name_field(column: &str) -> bool {
    NAME_FIELDS.contains(&column)
}

/// Strip parenthetical annotations, transliterate to ASCII and collapse
/// whitespace.
///
/// ```rust
/// use wcabotlib::format::normalize_name;
///
/// assert_eq!(normalize_name("Max Park (박현수)"), "Max Park");
/// assert_eq!(normalize_name("Féliks Zemdegs"), "Feliks Zemdegs");
/// ```
pub fn normalize_name(name: &str) -> String {
    let mut stripped = name.to_string();
    // Nested groups peel one level per pass.
    while PARENTHETICAL.is_match(&stripped) {
        stripped = PARENTHETICAL.replace_all(&stripped, "").into_owned();
    }

    deunicode(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a name cell.
///
/// Text is normalized; an integer becomes its textual form untouched; NULL
/// stays NULL.
pub fn normalize_value(value: &CellValue) -> CellValue {
    if value.is_null() {
        return CellValue::Null;
    }
    match value.as_text() {
        Some(s) => CellValue::Text(normalize_name(s)),
        None => CellValue::Text(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_native_script_annotation() {
        assert_eq!(normalize_name("Max Park (박현수)"), "Max Park");
        assert_eq!(normalize_name("Yusheng Du (杜宇生)"), "Yusheng Du");
    }

    #[test]
    fn test_transliterates_diacritics() {
        assert_eq!(normalize_name("Féliks Zemdegs"), "Feliks Zemdegs");
        assert_eq!(normalize_name("Tymon Kolasiński"), "Tymon Kolasinski");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize_name("  A   B  "), "A B");
        assert_eq!(normalize_name("A (x) B"), "A B");
    }

    #[test]
    fn test_nested_and_fullwidth_parentheses() {
        assert_eq!(normalize_name("Name (outer (inner))"), "Name");
        assert_eq!(normalize_name("Name（注釈）"), "Name");
    }

    #[test]
    fn test_ascii_is_fixpoint() {
        let once = normalize_name("Łukasz Burliga (Łukasz)");
        assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn test_normalize_value() {
        assert_eq!(
            normalize_value(&CellValue::text("Max Park (박현수)")),
            CellValue::text("Max Park")
        );
        assert_eq!(normalize_value(&CellValue::Integer(7)), CellValue::text("7"));
        assert_eq!(normalize_value(&CellValue::Null), CellValue::Null);
    }

    #[test]
    fn test_name_fields() {
        assert!(is_name_field("personName"));
        assert!(is_name_field("person_name"));
        assert!(!is_name_field("country_name"));
    }
}
