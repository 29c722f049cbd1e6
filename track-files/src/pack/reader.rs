use std::collections::HashMap;
use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use log::trace;

use crate::ParserError;
use crate::pack::types::{PACK_VERSION, PackAsset, PackEntry};

/// Entries pre-allocated from the header count at most, the count itself is untrusted.
const MAX_PREALLOC: usize = 1024;

pub struct PackReader {}

impl PackReader {
    /// Layout: the version string, the number of files and the fixed name length (both u32 LE),
    /// then per file its offset and length (u32 LE, offsets from the start of the pack) and a
    /// zero padded name. The file data follows the table.
    pub fn parse_asset(bytes: Vec<u8>) -> Result<PackAsset, ParserError> {
        let entries = Self::read_table(&bytes)?;
        trace!("Read pack with {} entries ({} bytes)", entries.len(), bytes.len());
        Ok(PackAsset { data: bytes, entries })
    }

    fn read_table(bytes: &[u8]) -> Result<HashMap<String, PackEntry>, ParserError> {
        let mut rdr = Cursor::new(bytes);

        let mut version = [0u8; 8];
        rdr.read_exact(&mut version)?;
        if &version != PACK_VERSION {
            return Err(ParserError::InvalidPackVersion {
                version: String::from_utf8_lossy(&version).into_owned(),
            });
        }

        let num_files = rdr.read_u32::<LittleEndian>()? as usize;
        let name_length = rdr.read_u32::<LittleEndian>()? as usize;

        let mut entries = HashMap::with_capacity(num_files.min(MAX_PREALLOC));
        let mut name_buf = Vec::new();
        for _ in 0..num_files {
            let offset = rdr.read_u32::<LittleEndian>()?;
            let length = rdr.read_u32::<LittleEndian>()?;

            // the table can't be longer than the file, so the name length is bounded by it
            if name_length > bytes.len() {
                return Err(ParserError::format(0, "Pack name length exceeds the pack"));
            }
            name_buf.resize(name_length, 0);
            rdr.read_exact(&mut name_buf)?;
            let end = name_buf.iter().position(|&b| b == 0).unwrap_or(name_buf.len());
            let name = String::from_utf8(name_buf[..end].to_vec())?;

            if offset as usize + length as usize > bytes.len() {
                return Err(ParserError::PackEntryOutOfBounds { name, offset, length });
            }

            entries.insert(name, PackEntry { offset, length });
        }

        Ok(entries)
    }
}
