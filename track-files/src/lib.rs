use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("The file is violating the expected format in line {line}, because: {reason}")]
    FormatError { line: usize, reason: String },

    /// Represents an empty source, e.g. a model file without a single face.
    #[error("Source contains no data")]
    EmptySource,

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error("The pack's version header {version:?} is not supported")]
    InvalidPackVersion { version: String },

    #[error("Pack entry {name} ({length} bytes at {offset}) lies outside of the pack")]
    PackEntryOutOfBounds { name: String, offset: u32, length: u32 },

    #[error(transparent)]
    UTF8ConversationError(#[from] std::string::FromUtf8Error),
}

impl ParserError {
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        ParserError::FormatError {
            line,
            reason: reason.into(),
        }
    }
}

pub mod common;
/// The property tree that backs every `key = value` / `[section]` file of a track.
pub mod config;
/// The old fixed-field-count object list (`objects/list.txt`).
pub mod legacy;
pub mod obj;
/// The binary object pack (`objects/objects.jpk`) bundling a track's object files.
pub mod pack;
pub mod roads;
