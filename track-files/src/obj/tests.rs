use crate::obj::reader::ObjReader;

const QUAD: &str = r#"# a unit quad
o quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
usemtl none
f 1/1/1 2/2/1 3/3/1 4/4/1
"#;

#[test]
fn parse_quad() -> Result<(), anyhow::Error> {
    let asset = ObjReader::parse_asset(QUAD.as_bytes())?;
    assert_eq!(asset.positions.len(), 4);
    assert_eq!(asset.texcoords.len(), 4);
    assert_eq!(asset.normals.len(), 1);
    assert_eq!(asset.faces.len(), 1);

    let face = &asset.faces[0];
    assert_eq!(face.vertices.len(), 4);
    assert_eq!(face.vertices[2].position, 2);
    assert_eq!(face.vertices[2].texcoord, Some(2));
    assert_eq!(face.vertices[2].normal, Some(0));
    Ok(())
}

#[test]
fn relative_and_position_only_indices() -> Result<(), anyhow::Error> {
    let asset = ObjReader::parse_asset("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\nf 1//1 2 3\nvn 0 0 1\n".as_bytes());
    // the normal is declared after it is referenced
    assert!(asset.is_err());

    let asset = ObjReader::parse_asset("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n".as_bytes())?;
    assert_eq!(asset.faces[0].vertices[0].position, 0);
    assert_eq!(asset.faces[0].vertices[2].position, 2);
    assert_eq!(asset.faces[0].vertices[0].texcoord, None);
    Ok(())
}

#[test]
fn empty_model_is_rejected() {
    assert!(ObjReader::parse_asset("v 0 0 0\n".as_bytes()).is_err());
    assert!(ObjReader::parse_asset("v 0 0 0\nv 1 0 0\nf 1 2\n".as_bytes()).is_err());
}
