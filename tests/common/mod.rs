#![allow(dead_code)]

use std::fmt::Write;
use std::io::Cursor;

use trackloader::io::memory::loader::MemoryLoader;

pub const TRACK: &str = "tracks/ring";
pub const OBJECTS: &str = "tracks/ring/objects";

pub fn png() -> Vec<u8> {
    let mut buf = Vec::new();
    image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 200, 200, 255]))
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("encode png");
    buf
}

/// A flat square of `size` at `(x, y)` on the ground.
pub fn quad_obj(x: f32, y: f32, size: f32) -> String {
    format!(
        "v {x0} {y0} 0\nv {x1} {y0} 0\nv {x1} {y1} 0\nv {x0} {y1} 0\nvt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\nf 1/1 2/2 3/3 4/4\n",
        x0 = x,
        y0 = y,
        x1 = x + size,
        y1 = y + size
    )
}

/// A closed box from `(0, 0, 0)` to `(2, 2, 2)`.
pub fn crate_obj() -> String {
    let mut text = String::new();
    for z in [0.0, 2.0] {
        for (x, y) in [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)] {
            let _ = writeln!(text, "v {} {} {}", x, y, z);
        }
    }
    text.push_str("f 1 4 3 2\nf 5 6 7 8\nf 1 2 6 5\nf 2 3 7 6\nf 3 4 8 7\nf 4 1 5 8\n");
    text
}

/// One road of straight, flat patches of 10m along the authoring z axis.
pub fn straight_roads(patches: usize) -> String {
    let mut text = String::from("1\n");
    let _ = writeln!(text, "{}", patches);
    for patch in 0..patches {
        let start = patch as f32 * 10.0;
        for row in 0..4 {
            for column in 0..4 {
                let _ = write!(
                    text,
                    "{} 0 {} ",
                    2.0 - 4.0 * column as f32 / 3.0,
                    start + 10.0 * row as f32 / 3.0
                );
            }
            text.push('\n');
        }
    }
    text
}

pub const SURFACES: &str = r#"
[surface asphalt]
Type = asphalt
BumpWaveLength = 10
BumpAmplitude = 0.01
FrictionNonTread = 1.0
FrictionTread = 0.9
RollResistanceCoefficient = 0.013
RollingDrag = 3

[surface grass]
Type = grass
BumpWaveLength = 0
BumpAmplitude = 0.05
FrictionNonTread = 0.8
FrictionTread = 0.7
"#;

pub const TRACK_TXT: &str = r#"
cull faces = 1
vertical tracking skyboxes = 1
start position 0 = 0, 0.5, 5
start position 1 = 0, 0.5, 15
start position 2 = 0, 0.5, 25
start orientation 2 = 0, 0, 90
lap sequences = 4
lap sequence 0 = 0, 0, 0
lap sequence 1 = 0, 2, 0
lap sequence 2 = 0, 4, 0
lap sequence 3 = 0, 6, 0
"#;

/// A complete track without objects: surfaces, eight road patches, start grid and lap.
pub fn base_track() -> MemoryLoader {
    let mut loader = MemoryLoader::new();
    loader.insert(format!("{}/surfaces.txt", TRACK), SURFACES);
    loader.insert(format!("{}/roads.trk", TRACK), straight_roads(8));
    loader.insert(format!("{}/track.txt", TRACK), TRACK_TXT);
    loader.insert("textures/racingline.png", png());
    loader
}

pub fn insert_object_file(loader: &mut MemoryLoader, name: &str, data: impl Into<Vec<u8>>) {
    loader.insert(format!("{}/{}", OBJECTS, name), data);
}

/// An `objects.jpk` holding the given files.
pub fn object_pack(files: &[(&str, &[u8])]) -> Vec<u8> {
    const NAME_LENGTH: usize = 32;
    let mut offset = 16 + files.len() * (8 + NAME_LENGTH);
    let mut pack = b"JPK01.00".to_vec();
    pack.extend((files.len() as u32).to_le_bytes());
    pack.extend((NAME_LENGTH as u32).to_le_bytes());
    for (name, data) in files {
        pack.extend((offset as u32).to_le_bytes());
        pack.extend((data.len() as u32).to_le_bytes());
        let mut padded = name.as_bytes().to_vec();
        padded.resize(NAME_LENGTH, 0);
        pack.extend(padded);
        offset += data.len();
    }
    for (_, data) in files {
        pack.extend_from_slice(data);
    }
    pack
}
