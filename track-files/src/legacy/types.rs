/// Number of fields per record the current list format declares.
pub const EXPECTED_PARAMS: usize = 17;
/// Oldest record shape that is still understood; everything after it is defaulted.
pub const MIN_PARAMS: usize = 14;
/// Anything above this is not an object list but garbage.
pub const MAX_PARAMS: usize = 64;

/// One object line of the old list format. Only the fields that are still in use are kept, the
/// unused legacy columns (bump, driveable, friction, rolling) are skipped positionally.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRecord {
    pub model: String,
    pub texture: String,
    pub mipmap: bool,
    pub nolighting: bool,
    pub skybox: bool,
    /// 0: opaque, 1: alpha blended, 2: opaque but double sided
    pub transparent_blend: i32,
    pub collideable: bool,
    pub isashadow: bool,
    pub clamp_texture: i32,
    pub surface: i32,
}

impl Default for ObjectRecord {
    fn default() -> Self {
        Self {
            model: String::new(),
            texture: String::new(),
            mipmap: true,
            nolighting: false,
            skybox: false,
            transparent_blend: 0,
            collideable: false,
            isashadow: false,
            clamp_texture: 0,
            surface: 0,
        }
    }
}

pub(crate) mod field {
    pub const MODEL: usize = 0;
    pub const TEXTURE: usize = 1;
    pub const MIPMAP: usize = 2;
    pub const NOLIGHTING: usize = 3;
    pub const SKYBOX: usize = 4;
    pub const TRANSPARENT_BLEND: usize = 5;
    // 6: bump wavelength, 7: bump amplitude, 8: driveable
    pub const COLLIDEABLE: usize = 9;
    // 10: friction (no tread), 11: friction (tread), 12: rolling resistance, 13: rolling drag
    pub const ISASHADOW: usize = 14;
    pub const CLAMP_TEXTURE: usize = 15;
    pub const SURFACE: usize = 16;
}
