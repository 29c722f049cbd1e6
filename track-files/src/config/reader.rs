use std::io::BufRead;

use crate::ParserError;
use crate::config::types::ConfigTree;

pub struct ConfigReader {}

impl ConfigReader {
    /// Parses the INI-like dialect: `key = value` lines, `[section.subsection]` headers that
    /// open a (nested) section for the following keys and whole-line `#`/`;` comments.
    pub fn parse_file<R: BufRead>(reader: R) -> Result<ConfigTree, ParserError> {
        let mut root = ConfigTree::default();
        let mut section: Vec<String> = Vec::new();

        for (index, line_res) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line_res?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let Some(name) = header.strip_suffix(']') else {
                    return Err(ParserError::format(line_number, "Unterminated section header"));
                };

                section = name
                    .split('.')
                    .map(|segment| segment.trim().to_string())
                    .collect();

                if section.iter().any(String::is_empty) {
                    return Err(ParserError::format(
                        line_number,
                        format!("Empty segment in section name [{}]", name),
                    ));
                }

                // Sections exist even when they don't carry any key.
                Self::section_mut(&mut root, &section);
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(ParserError::format(
                    line_number,
                    format!("Expected \"key = value\", got \"{}\"", line),
                ));
            };

            let key = key.trim();
            if key.is_empty() {
                return Err(ParserError::format(line_number, "Empty key"));
            }

            Self::section_mut(&mut root, &section).set(key, value.trim());
        }

        Ok(root)
    }

    pub fn parse_bytes(bytes: &[u8]) -> Result<ConfigTree, ParserError> {
        Self::parse_file(bytes)
    }

    fn section_mut<'a>(root: &'a mut ConfigTree, section: &[String]) -> &'a mut ConfigTree {
        section
            .iter()
            .fold(root, |tree, segment| tree.child_mut_or_insert(segment))
    }
}
