use crate::ParserError;
use crate::pack::reader::PackReader;
use crate::pack::types::PACK_VERSION;

fn pack(files: &[(&str, &[u8])], name_length: u32) -> Vec<u8> {
    let table_end = 16 + files.len() * (8 + name_length as usize);
    let mut bytes = PACK_VERSION.to_vec();
    bytes.extend((files.len() as u32).to_le_bytes());
    bytes.extend(name_length.to_le_bytes());

    let mut offset = table_end;
    for (name, data) in files {
        bytes.extend((offset as u32).to_le_bytes());
        bytes.extend((data.len() as u32).to_le_bytes());
        let mut padded = name.as_bytes().to_vec();
        padded.resize(name_length as usize, 0);
        bytes.extend(padded);
        offset += data.len();
    }
    for (_, data) in files {
        bytes.extend_from_slice(data);
    }
    bytes
}

#[test]
fn reads_files_by_name() -> Result<(), anyhow::Error> {
    let bytes = pack(&[("wall.obj", b"v 0 0 0\n"), ("tree.obj", b"v 1 1 1\nv 2 2 2\n")], 32);
    let asset = PackReader::parse_asset(bytes)?;

    assert_eq!(asset.len(), 2);
    assert_eq!(asset.file("wall.obj"), Some(&b"v 0 0 0\n"[..]));
    assert_eq!(asset.file("tree.obj"), Some(&b"v 1 1 1\nv 2 2 2\n"[..]));
    assert!(asset.file("missing.obj").is_none());
    assert!(asset.contains("tree.obj"));
    Ok(())
}

#[test]
fn empty_pack() -> Result<(), anyhow::Error> {
    let asset = PackReader::parse_asset(pack(&[], 16))?;
    assert!(asset.is_empty());
    assert_eq!(asset.names().count(), 0);
    Ok(())
}

#[test]
fn wrong_version_is_rejected() {
    let mut bytes = pack(&[("wall.obj", b"v 0 0 0\n")], 16);
    bytes[3] = b'9';
    assert!(matches!(
        PackReader::parse_asset(bytes),
        Err(ParserError::InvalidPackVersion { .. })
    ));
}

#[test]
fn entries_past_the_end_are_rejected() {
    let mut bytes = pack(&[("wall.obj", b"v 0 0 0\n")], 16);
    // grow the length of the only entry
    bytes[20..24].copy_from_slice(&1000u32.to_le_bytes());
    assert!(matches!(
        PackReader::parse_asset(bytes),
        Err(ParserError::PackEntryOutOfBounds { .. })
    ));
}

#[test]
fn bogus_counts_are_an_error() {
    let mut bytes = PACK_VERSION.to_vec();
    bytes.extend(u32::MAX.to_le_bytes());
    bytes.extend(u32::MAX.to_le_bytes());
    assert!(PackReader::parse_asset(bytes).is_err());

    let truncated = pack(&[("wall.obj", b"v 0 0 0\n")], 16);
    assert!(PackReader::parse_asset(truncated[..20].to_vec()).is_err());
}
