#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct C3Vector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl C3Vector {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<[f32; 3]> for C3Vector {
    fn from(value: [f32; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<C3Vector> for [f32; 3] {
    fn from(value: C3Vector) -> Self {
        [value.x, value.y, value.z]
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct C2Vector {
    pub x: f32,
    pub y: f32,
}
