use std::fmt::Display;
use std::str::FromStr;

use crate::ParserError;

/// Whitespace separated token stream over an owned text buffer. A token starting with `#`
/// comments out the remainder of its line.
///
/// The reader only keeps a byte offset into the buffer, so it can be stored and resumed later on.
#[derive(Debug, Clone)]
pub struct TokenReader {
    text: String,
    offset: usize,
    line: usize,
}

impl TokenReader {
    pub fn new(text: String) -> Self {
        Self {
            text,
            offset: 0,
            line: 1,
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ParserError> {
        Ok(Self::new(String::from_utf8(bytes)?))
    }

    /// The (1-based) line the reader currently points into.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn next_token(&mut self) -> Option<&str> {
        let bytes = self.text.as_bytes();
        loop {
            while self.offset < bytes.len() && bytes[self.offset].is_ascii_whitespace() {
                if bytes[self.offset] == b'\n' {
                    self.line += 1;
                }
                self.offset += 1;
            }

            if self.offset >= bytes.len() {
                return None;
            }

            if bytes[self.offset] == b'#' {
                while self.offset < bytes.len() && bytes[self.offset] != b'\n' {
                    self.offset += 1;
                }
                continue;
            }

            let start = self.offset;
            while self.offset < bytes.len() && !bytes[self.offset].is_ascii_whitespace() {
                self.offset += 1;
            }

            return Some(&self.text[start..self.offset]);
        }
    }

    pub fn next_owned(&mut self) -> Option<String> {
        self.next_token().map(str::to_string)
    }

    /// Reads the next token and parses it, failing when the stream is exhausted or the token
    /// does not parse.
    pub fn parse_next<T>(&mut self, what: &str) -> Result<T, ParserError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let line = self.line;
        let Some(token) = self.next_token() else {
            return Err(ParserError::format(line, format!("Missing {}", what)));
        };

        token
            .parse::<T>()
            .map_err(|err| ParserError::format(line, format!("Invalid {} \"{}\": {}", what, token, err)))
    }
}

/// The lenient boolean notation of the track files: `0`/`1`, but also any other integer and
/// `true`/`false`.
pub fn parse_flag(token: &str) -> Option<bool> {
    match token.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => Some(true),
        "false" | "no" | "off" => Some(false),
        other => other.parse::<i32>().ok().map(|value| value != 0),
    }
}
