//! Conversion of raw source tokens into column values.
//!
//! The only real conversion is the `Y`/`N` flag used for boolean columns.
//! Everything else is passed through as text and cast by PostgreSQL when the
//! batch is inserted, so malformed numbers surface as storage errors.

use crate::schema::FieldKind;

/// A non-null value ready to be placed in a column batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Bool(bool),
}

/// Reason a token could not be coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoerceError {
    InvalidBoolean(String),
}

/// Map a boolean flag: `Y` is true, `N` is false, empty is NULL.
pub fn coerce_flag(raw: &str) -> Result<Option<bool>, CoerceError> {
    match raw {
        "Y" => Ok(Some(true)),
        "N" => Ok(Some(false)),
        "" => Ok(None),
        other => Err(CoerceError::InvalidBoolean(other.to_string())),
    }
}

/// Map a non-boolean token: empty is NULL, anything else is kept verbatim.
pub fn coerce_text(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Coerce `raw` for a column of the given kind.
pub fn coerce(kind: FieldKind, raw: &str) -> Result<Option<CellValue>, CoerceError> {
    if kind.is_boolean() {
        return Ok(coerce_flag(raw)?.map(CellValue::Bool));
    }

    Ok(coerce_text(raw).map(CellValue::Text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_is_total_on_y_n_empty() {
        assert_eq!(coerce_flag("Y"), Ok(Some(true)));
        assert_eq!(coerce_flag("N"), Ok(Some(false)));
        assert_eq!(coerce_flag(""), Ok(None));
    }

    #[test]
    fn test_flag_rejects_other_tokens() {
        for token in ["y", "n", "T", "1", " ", "YES", "Y "] {
            assert_eq!(
                coerce_flag(token),
                Err(CoerceError::InvalidBoolean(token.to_string())),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_text_empty_becomes_null() {
        assert_eq!(coerce_text(""), None);
        assert_eq!(coerce_text("0100"), Some("0100".to_string()));
        assert_eq!(coerce_text(" "), Some(" ".to_string()));
    }

    #[test]
    fn test_coerce_dispatches_on_kind() {
        assert_eq!(
            coerce(FieldKind::Boolean, "Y"),
            Ok(Some(CellValue::Bool(true)))
        );
        assert_eq!(coerce(FieldKind::Boolean, ""), Ok(None));
        assert_eq!(
            coerce(FieldKind::SmallUnsigned, "12"),
            Ok(Some(CellValue::Text("12".to_string())))
        );
        assert_eq!(
            coerce(FieldKind::Char { max_length: 1 }, "Y"),
            Ok(Some(CellValue::Text("Y".to_string())))
        );
        assert_eq!(
            coerce(
                FieldKind::Decimal {
                    max_digits: 6,
                    decimal_places: 2
                },
                ""
            ),
            Ok(None)
        );
    }
}
