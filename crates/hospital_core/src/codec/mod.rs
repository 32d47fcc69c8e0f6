//! Line codec between domain records and delimited text rows.
//!
//! # Responsibility
//! - Encode one record as one `,`-delimited line in a fixed column order.
//! - Decode one line back, tolerating short legacy rows.
//!
//! # Invariants
//! - Text fields are escaped uniformly (`\\`, `\,`, `\n`, `\r`), so free text
//!   may contain the delimiter in any column.
//! - Required leading columns must exist; optional trailing columns default
//!   to `""` or `None`.
//! - An empty optional numeric column decodes to `None`, never zero.
//! - Field whitespace is data; only blank and comment detection trims.
//! - Legacy four-column appointment notes are taken raw, without unescaping.

use crate::model::appointment::ParseAppointmentIdError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod fields;
mod records;
mod timestamp;

pub use fields::{escape_field, join_fields, split_fields};
pub use timestamp::parse_timestamp;

pub const FIELD_DELIMITER: char = ',';
pub const COMMENT_MARKER: char = '#';

pub type CodecResult<T> = Result<T, CodecError>;

/// Row-level decode failure. Never fatal to a whole file load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    MissingField {
        column: &'static str,
        index: usize,
        found: usize,
    },
    InvalidNumber {
        column: &'static str,
        value: String,
    },
    InvalidAppointmentId(ParseAppointmentIdError),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField {
                column,
                index,
                found,
            } => write!(
                f,
                "missing required column `{column}` at position {} (row has {found} columns)",
                index + 1
            ),
            Self::InvalidNumber { column, value } => {
                write!(f, "column `{column}` is not a valid number: `{value}`")
            }
            Self::InvalidAppointmentId(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidAppointmentId(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseAppointmentIdError> for CodecError {
    fn from(value: ParseAppointmentIdError) -> Self {
        Self::InvalidAppointmentId(value)
    }
}

/// Two-way mapping between one record and one text line.
pub trait RecordCodec: Sized {
    /// File name inside the data directory.
    const FILE_NAME: &'static str;
    /// Column header written as a comment on the first line of the file.
    const HEADER: &'static str;

    fn encode(&self) -> String;
    fn decode(line: &str) -> CodecResult<Self>;
}

/// Returns the data portion of `raw`, or `None` for blank and `#` comment
/// lines. Only a trailing `\r` is removed; field whitespace is kept.
pub fn data_line(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
        return None;
    }
    Some(raw.strip_suffix('\r').unwrap_or(raw))
}

/// Header comment line for codec `T`.
pub fn header_line<T: RecordCodec>() -> String {
    format!("{COMMENT_MARKER} {}", T::HEADER)
}

#[cfg(test)]
mod tests {
    use super::data_line;

    #[test]
    fn data_line_skips_blank_and_comment_lines() {
        assert_eq!(data_line(""), None);
        assert_eq!(data_line("   \t"), None);
        assert_eq!(data_line("# id,name"), None);
        assert_eq!(data_line("  # indented comment"), None);
        assert_eq!(data_line("10001,Ann\r"), Some("10001,Ann"));
    }

    #[test]
    fn data_line_keeps_field_whitespace() {
        assert_eq!(data_line(" 10001,Ann \r"), Some(" 10001,Ann "));
        assert_eq!(
            data_line("A00001,10001,20001,,bring labs "),
            Some("A00001,10001,20001,,bring labs ")
        );
    }
}
