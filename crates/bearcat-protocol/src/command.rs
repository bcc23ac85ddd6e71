//! Wire command and response representations
//!
//! The BC125AT speaks a line-oriented ASCII protocol: one command per line,
//! fields joined by commas, a three-letter verb first. Responses echo the
//! verb and report failures with a trailing `ERR` or `NG` field.

use std::fmt;

use crate::error::ParseError;

/// A command tuple: the protocol verb plus positional arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    parts: Vec<String>,
}

impl Command {
    /// Create a command carrying only a verb
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            parts: vec![verb.into()],
        }
    }

    /// Append one positional argument (builder style)
    pub fn arg(mut self, value: impl ToString) -> Self {
        self.parts.push(value.to_string());
        self
    }

    /// The protocol verb
    pub fn verb(&self) -> &str {
        &self.parts[0]
    }

    /// The positional arguments after the verb
    pub fn args(&self) -> &[String] {
        &self.parts[1..]
    }

    /// Comma-joined wire form, without the line terminator
    pub fn wire_format(&self) -> String {
        self.parts.join(",")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wire_format())
    }
}

/// A parsed response: comma-split fields with the echoed verb already removed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Response {
    fields: Vec<String>,
}

impl Response {
    /// Build a response from already-split fields
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Split a verb-stripped response line into fields
    ///
    /// An empty line yields a response with no fields at all, which is how a
    /// bare command echo (verb only, no data) presents itself.
    pub fn from_line(line: &str) -> Self {
        if line.is_empty() {
            return Self { fields: Vec::new() };
        }
        Self {
            fields: line.split(',').map(str::to_string).collect(),
        }
    }

    /// All positional fields
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Positional field access, failing when the response is too short
    pub fn field(&self, index: usize) -> Result<&str, ParseError> {
        self.fields
            .get(index)
            .map(String::as_str)
            .ok_or(ParseError::TruncatedResponse {
                expected: index + 1,
                got: self.fields.len(),
            })
    }

    /// Parse one positional field into a numeric type
    pub fn parse_field<T: std::str::FromStr>(
        &self,
        index: usize,
        name: &'static str,
    ) -> Result<T, ParseError> {
        let field = self.field(index)?;
        field.parse().map_err(|_| ParseError::InvalidField {
            field: name,
            value: field.to_string(),
        })
    }

    /// True when the final field is the device's ERR or NG marker
    pub fn is_error(&self) -> bool {
        matches!(
            self.fields.last().map(String::as_str),
            Some("ERR") | Some("NG")
        )
    }
}
