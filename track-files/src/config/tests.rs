use crate::config::reader::ConfigReader;

#[test]
fn track_descriptor() -> Result<(), anyhow::Error> {
    let text = r#"# track.txt
cull faces = 1
vertical tracking skyboxes = 0
start position 0 = 1.5, 2, -3
start orientation 0 = 0,0,90
lap sequences = 2
"#;

    let tree = ConfigReader::parse_bytes(text.as_bytes())?;
    assert_eq!(tree.get::<bool>("cull faces"), Some(true));
    assert_eq!(tree.get::<bool>("vertical tracking skyboxes"), Some(false));
    assert_eq!(tree.get::<[f32; 3]>("start position 0"), Some([1.5, 2.0, -3.0]));
    assert_eq!(tree.get::<[f32; 3]>("start orientation 0"), Some([0.0, 0.0, 90.0]));
    assert_eq!(tree.get::<i32>("lap sequences"), Some(2));
    assert_eq!(tree.get::<i32>("start position 1"), None);
    Ok(())
}

#[test]
fn nested_sections_keep_file_order() -> Result<(), anyhow::Error> {
    let text = r#"
[object.b-stand]
position = 1,2,3

[object.b-stand.body]
model = stand.obj
texture = stand.png, , stand-normal.png

[object.a-tree]
body = trees/oak/body.txt
"#;

    let tree = ConfigReader::parse_bytes(text.as_bytes())?;
    let objects = tree.child("object").expect("object section");
    let names: Vec<&str> = objects.children().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["b-stand", "a-tree"]);

    let body = tree
        .child_path(["object", "b-stand", "body"])
        .expect("inline body");
    assert_eq!(body.get::<String>("model").as_deref(), Some("stand.obj"));
    assert_eq!(
        body.get::<Vec<String>>("texture"),
        Some(vec![
            "stand.png".to_string(),
            "".to_string(),
            "stand-normal.png".to_string()
        ])
    );

    let tree_body = tree.child_path(["object", "a-tree", "body"]).unwrap();
    assert!(!tree_body.has_children());
    assert_eq!(tree_body.value(), "trees/oak/body.txt");
    Ok(())
}

#[test]
fn malformed_lines_are_rejected() {
    assert!(ConfigReader::parse_bytes(b"[unterminated\n").is_err());
    assert!(ConfigReader::parse_bytes(b"no assignment here\n").is_err());
    assert!(ConfigReader::parse_bytes(b" = 3\n").is_err());
}

#[test]
fn unconvertible_values_are_none() -> Result<(), anyhow::Error> {
    let tree = ConfigReader::parse_bytes(b"mass = heavy\ncenter = 1,2\n")?;
    assert_eq!(tree.get::<f32>("mass"), None);
    assert_eq!(tree.get::<[f32; 3]>("center"), None);
    assert_eq!(tree.get_or::<f32>("mass", 0.5), 0.5);
    Ok(())
}
