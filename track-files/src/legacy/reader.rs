use std::str::FromStr;

use log::trace;

use crate::ParserError;
use crate::common::reader::{TokenReader, parse_flag};
use crate::legacy::types::{MAX_PARAMS, MIN_PARAMS, ObjectRecord, field};

/// Resumable reader over the old object list. The first token declares the number of fields
/// every record has, afterwards every record is read as exactly that many tokens.
pub struct ObjectListReader {
    tokens: TokenReader,
    params_per_object: usize,
}

impl ObjectListReader {
    pub fn new(text: String) -> Self {
        Self {
            tokens: TokenReader::new(text),
            params_per_object: 0,
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ParserError> {
        Ok(Self {
            tokens: TokenReader::from_bytes(bytes)?,
            params_per_object: 0,
        })
    }

    /// Reads the field count header. Counts below [`MIN_PARAMS`] or above [`MAX_PARAMS`] are
    /// rejected.
    pub fn read_header(&mut self) -> Result<usize, ParserError> {
        let line = self.tokens.line();
        let params_per_object: usize = self.tokens.parse_next("params per object header")?;
        if params_per_object < MIN_PARAMS {
            return Err(ParserError::format(
                line,
                format!(
                    "Object list has {} params per object, at least {} are required",
                    params_per_object, MIN_PARAMS
                ),
            ));
        }
        if params_per_object > MAX_PARAMS {
            return Err(ParserError::format(
                line,
                format!(
                    "Object list has {} params per object, at most {} are supported",
                    params_per_object, MAX_PARAMS
                ),
            ));
        }

        self.params_per_object = params_per_object;
        Ok(params_per_object)
    }

    pub fn params_per_object(&self) -> usize {
        self.params_per_object
    }

    /// Byte offset of the next unread token.
    pub fn position(&self) -> usize {
        self.tokens.offset()
    }

    /// Reads the next record. `None` when the list is exhausted. A record cut short by the end of
    /// the file keeps the defaults for its missing fields.
    pub fn next_record(&mut self) -> Option<ObjectRecord> {
        let model = self.tokens.next_owned()?;

        let mut fields = Vec::with_capacity(self.params_per_object);
        fields.push(model);
        while fields.len() < self.params_per_object {
            match self.tokens.next_owned() {
                Some(token) => fields.push(token),
                None => break,
            }
        }

        trace!(
            "Read object record {} ({} of {} fields)",
            fields[field::MODEL],
            fields.len(),
            self.params_per_object
        );

        let defaults = ObjectRecord::default();
        Some(ObjectRecord {
            texture: fields
                .get(field::TEXTURE)
                .cloned()
                .unwrap_or(defaults.texture),
            mipmap: flag_field(&fields, field::MIPMAP).unwrap_or(defaults.mipmap),
            nolighting: flag_field(&fields, field::NOLIGHTING).unwrap_or(defaults.nolighting),
            skybox: flag_field(&fields, field::SKYBOX).unwrap_or(defaults.skybox),
            transparent_blend: parse_field(&fields, field::TRANSPARENT_BLEND).unwrap_or(defaults.transparent_blend),
            collideable: flag_field(&fields, field::COLLIDEABLE).unwrap_or(defaults.collideable),
            isashadow: flag_field(&fields, field::ISASHADOW).unwrap_or(defaults.isashadow),
            clamp_texture: parse_field(&fields, field::CLAMP_TEXTURE).unwrap_or(defaults.clamp_texture),
            surface: parse_field(&fields, field::SURFACE).unwrap_or(defaults.surface),
            model: fields.swap_remove(field::MODEL),
        })
    }

    /// Counts the records of a list without keeping any of them, for progress reporting.
    pub fn count_records(text: &str) -> usize {
        let mut reader = ObjectListReader::new(text.to_string());
        if reader.read_header().is_err() {
            return 0;
        }

        let mut count = 0;
        while reader.next_record().is_some() {
            count += 1;
        }

        count
    }
}

fn flag_field(fields: &[String], index: usize) -> Option<bool> {
    fields.get(index).and_then(|token| parse_flag(token))
}

fn parse_field<T: FromStr>(fields: &[String], index: usize) -> Option<T> {
    fields.get(index).and_then(|token| token.parse::<T>().ok())
}
