//! Streaming JSON5 reader for asset records
//!
//! Accepts one record per line (JSONL) as well as records spread over several
//! lines. JSON5 extras (comments, trailing commas, unquoted keys) are allowed.

use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Read};
use thiserror::Error;

use crate::models::Asset;

/// Error type for a record that failed to parse.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
}

/// A problem found while reading the stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub message: String,
    pub line: usize,
}

/// An asset together with the line its record starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAsset {
    pub asset: Asset,
    pub line: usize,
}

/// Result of reading a record stream.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub assets: Vec<ParsedAsset>,
    pub warnings: Vec<Warning>,
}

/// Parse a single JSON5 record.
pub fn parse_record(text: &str, line: usize) -> Result<Asset, ParseError> {
    json5::from_str(text).map_err(|e| ParseError { message: e.to_string(), line })
}

/// Tracks whether the accumulated text holds a complete top-level value.
#[derive(Debug, Default)]
struct Nesting {
    braces: i32,
    brackets: i32,
    quote: Option<char>,
    escaped: bool,
    block_comment: bool,
    has_value: bool,
}

impl Nesting {
    fn feed(&mut self, line: &str) {
        let mut chars = line.chars().peekable();
        while let Some(ch) = chars.next() {
            if self.escaped {
                self.escaped = false;
                continue;
            }
            if self.block_comment {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    self.block_comment = false;
                }
                continue;
            }
            match (self.quote, ch) {
                (Some(_), '\\') => self.escaped = true,
                (Some(q), c) if c == q => self.quote = None,
                (Some(_), _) => {}
                (None, '/') => match chars.peek() {
                    // Line comment, rest of the line is ignored
                    Some('/') => return,
                    Some('*') => {
                        chars.next();
                        self.block_comment = true;
                    }
                    _ => {}
                },
                (None, c) if c.is_whitespace() => {}
                (None, '"' | '\'') => {
                    self.has_value = true;
                    self.quote = Some(ch);
                }
                (None, c) => {
                    self.has_value = true;
                    match c {
                        '{' => self.braces += 1,
                        '}' => self.braces -= 1,
                        '[' => self.brackets += 1,
                        ']' => self.brackets -= 1,
                        _ => {}
                    }
                }
            }
        }
    }

    fn balanced(&self) -> bool {
        self.braces <= 0 && self.brackets <= 0 && self.quote.is_none() && !self.block_comment
    }
}

/// Parse a stream of asset records.
///
/// A record that fails to parse becomes a warning and reading continues with
/// the next record. Only an I/O error ends the stream early.
pub fn parse_stream<R: Read>(reader: R) -> ParseResult {
    let mut result = ParseResult::default();
    let mut accumulator = String::new();
    let mut nesting = Nesting::default();
    let mut start_line = 1;

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line_number = index + 1;
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                result.warnings.push(Warning { message: e.to_string(), line: line_number });
                return result;
            }
        };

        if accumulator.is_empty() {
            if line.trim().is_empty() || line.trim_start().starts_with("//") {
                continue;
            }
            start_line = line_number;
        } else {
            accumulator.push('\n');
        }
        accumulator.push_str(&line);
        nesting.feed(&line);

        if nesting.balanced() && !nesting.has_value {
            // Only comments so far
            accumulator.clear();
        } else if nesting.balanced() {
            match parse_record(&accumulator, start_line) {
                Ok(asset) => result.assets.push(ParsedAsset { asset, line: start_line }),
                Err(e) => result.warnings.push(Warning { message: e.message, line: e.line }),
            }
            accumulator.clear();
            nesting = Nesting::default();
        }
    }

    if !accumulator.trim().is_empty() {
        match parse_record(&accumulator, start_line) {
            Ok(asset) => result.assets.push(ParsedAsset { asset, line: start_line }),
            Err(e) => result.warnings.push(Warning { message: e.message, line: e.line }),
        }
    }

    result
}
