use std::fmt::Write;

use crate::roads::reader::RoadsReader;

fn flat_patch(text: &mut String, z0: f32, z1: f32) {
    for row in 0..4 {
        let z = z0 + (z1 - z0) * row as f32 / 3.0;
        for column in 0..4 {
            writeln!(text, "{} 0 {}", column as f32, z).unwrap();
        }
    }
}

#[test]
fn parse_two_strips() -> Result<(), anyhow::Error> {
    let mut text = String::from("2\n# first strip\n2\n");
    flat_patch(&mut text, 0.0, 3.0);
    flat_patch(&mut text, 3.0, 6.0);
    text.push_str("1\n");
    flat_patch(&mut text, 10.0, 12.0);

    let roads = RoadsReader::parse_asset(text.into_bytes())?;
    assert_eq!(roads.len(), 2);
    assert_eq!(roads[0].patches.len(), 2);
    assert_eq!(roads[1].patches.len(), 1);
    assert_eq!(roads[0].patches[1].points[0][0].z, 3.0);
    assert_eq!(roads[0].patches[1].points[3][3].x, 3.0);
    assert_eq!(roads[1].patches[0].points[3][0].z, 12.0);
    Ok(())
}

#[test]
fn truncated_file_is_an_error() {
    let mut text = String::from("1\n2\n");
    flat_patch(&mut text, 0.0, 3.0);
    assert!(RoadsReader::parse_asset(text.into_bytes()).is_err());
    assert!(RoadsReader::parse_asset(b"two".to_vec()).is_err());
}

#[test]
fn bogus_counts_are_an_error() {
    assert!(RoadsReader::parse_asset(b"1\n100000000000000000\n0 0 0\n".to_vec()).is_err());
    assert!(RoadsReader::parse_asset(b"100000000000000000\n".to_vec()).is_err());
}
