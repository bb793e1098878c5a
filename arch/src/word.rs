use crate::{FIELD_LIMIT, WORD_WIDTH};
use color_print::cformat;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("`{0}` is not an integer")]
    NotNumeric(String),

    #[error("`{0}` is not a 4-digit word")]
    Width(String),

    #[error("address field {0} does not fit in 3 digits")]
    FieldOverflow(usize),
}

/// A 4-digit address word: one high-order digit followed by a 3-digit field.
///
/// The high-order digit is carried through linking untouched. Only the
/// field is ever rewritten (relocation adds the module base, resolution
/// substitutes a symbol value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word {
    opcode: u8,
    field: u16,
}

impl Word {
    pub fn parse(s: &str) -> Result<Self, WordError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(WordError::NotNumeric(s.to_string()));
        }
        if s.len() != WORD_WIDTH {
            return Err(WordError::Width(s.to_string()));
        }
        let value: u16 = s
            .parse()
            .map_err(|_| WordError::NotNumeric(s.to_string()))?;
        Ok(Word {
            opcode: (value / FIELD_LIMIT as u16) as u8,
            field: value % FIELD_LIMIT as u16,
        })
    }

    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    pub fn field(&self) -> usize {
        self.field as usize
    }

    /// Full numeric value of the word, e.g. `1004` for `"1004"`.
    pub fn value(&self) -> usize {
        self.opcode as usize * FIELD_LIMIT + self.field as usize
    }

    /// Same high-order digit, new 3-digit field.
    pub fn with_field(self, field: usize) -> Result<Self, WordError> {
        if field >= FIELD_LIMIT {
            return Err(WordError::FieldOverflow(field));
        }
        Ok(Word {
            opcode: self.opcode,
            field: field as u16,
        })
    }

    pub fn cformat(&self) -> String {
        cformat!("<b>{}</><y>{:03}</>", self.opcode, self.field)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.opcode, self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_word {
        ($($name:ident: $text:expr => ($opcode:expr, $field:expr),)*) => {
            $(
                #[test]
                fn $name() {
                    let word = Word::parse($text).unwrap();
                    assert_eq!(word.opcode(), $opcode);
                    assert_eq!(word.field(), $field);
                    assert_eq!(word.to_string(), $text);
                }
            )*
        }
    }

    test_word! {
        parse_plain: "1004" => (1, 4),
        parse_zero: "0000" => (0, 0),
        parse_max: "9999" => (9, 999),
        parse_leading_zero_field: "5012" => (5, 12),
    }

    #[test]
    fn rejects_non_numeric() {
        assert_eq!(Word::parse("10a4"), Err(WordError::NotNumeric("10a4".into())));
        assert_eq!(Word::parse("-123"), Err(WordError::NotNumeric("-123".into())));
        assert_eq!(Word::parse(""), Err(WordError::NotNumeric("".into())));
    }

    #[test]
    fn rejects_wrong_width() {
        assert_eq!(Word::parse("100"), Err(WordError::Width("100".into())));
        assert_eq!(Word::parse("10000"), Err(WordError::Width("10000".into())));
    }

    #[test]
    fn with_field_keeps_opcode() {
        let word = Word::parse("3007").unwrap().with_field(15).unwrap();
        assert_eq!(word.to_string(), "3015");
        assert_eq!(word.value(), 3015);
    }

    #[test]
    fn with_field_rejects_overflow() {
        let word = Word::parse("3007").unwrap();
        assert_eq!(word.with_field(1000), Err(WordError::FieldOverflow(1000)));
    }
}
