//! Field escaping and positional access for delimited rows.

use super::{CodecError, CodecResult, FIELD_DELIMITER};
use std::str::FromStr;

const ESCAPE: char = '\\';

/// Escapes one text field so it never contains a raw delimiter or newline.
pub fn escape_field(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            ESCAPE => escaped.push_str("\\\\"),
            FIELD_DELIMITER => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Escapes and joins fields into one line.
pub fn join_fields<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|field| escape_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(&FIELD_DELIMITER.to_string())
}

/// Splits a line on unescaped delimiters and unescapes every field.
///
/// Unknown escape sequences and a trailing lone backslash are kept
/// literally, so unescaped legacy content survives unchanged.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match chars.next() {
                Some(ESCAPE) => current.push(ESCAPE),
                Some(FIELD_DELIMITER) => current.push(FIELD_DELIMITER),
                Some('n') => current.push('\n'),
                Some('r') => current.push('\r'),
                Some(other) => {
                    current.push(ESCAPE);
                    current.push(other);
                }
                None => current.push(ESCAPE),
            },
            FIELD_DELIMITER => fields.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    fields.push(current);
    fields
}

/// Positional view over one decoded row.
pub(crate) struct Row {
    values: Vec<String>,
}

impl Row {
    pub(crate) fn parse(line: &str) -> Self {
        Self {
            values: split_fields(line),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn required(&self, index: usize, column: &'static str) -> CodecResult<&str> {
        self.values
            .get(index)
            .map(String::as_str)
            .ok_or(CodecError::MissingField {
                column,
                index,
                found: self.values.len(),
            })
    }

    /// Missing trailing columns read as `""`.
    pub(crate) fn optional(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or("")
    }

    pub(crate) fn required_number<T: FromStr>(
        &self,
        index: usize,
        column: &'static str,
    ) -> CodecResult<T> {
        let value = self.required(index, column)?;
        parse_number(value, column)
    }

    /// Missing or blank columns read as `None`.
    pub(crate) fn optional_number<T: FromStr>(
        &self,
        index: usize,
        column: &'static str,
    ) -> CodecResult<Option<T>> {
        let value = self.optional(index);
        if value.trim().is_empty() {
            return Ok(None);
        }
        parse_number(value, column).map(Some)
    }

    /// Columns from `index` onward re-joined with the delimiter.
    pub(crate) fn remainder(&self, index: usize) -> String {
        self.values
            .get(index..)
            .map(|rest| rest.join(&FIELD_DELIMITER.to_string()))
            .unwrap_or_default()
    }
}

fn parse_number<T: FromStr>(value: &str, column: &'static str) -> CodecResult<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| CodecError::InvalidNumber {
            column,
            value: value.to_string(),
        })
}
