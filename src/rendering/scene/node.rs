use glam::{Affine3A, Quat, Vec3};

use crate::rendering::scene::container::{Handle, KeyedContainer};
use crate::rendering::scene::drawable::Drawable;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.translation == Vec3::ZERO && self.rotation == Quat::IDENTITY
    }

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DrawListKind {
    NormalNoBlend,
    NormalBlend,
    NormalNoBlendNoLighting,
    SkyboxBlend,
    SkyboxNoBlend,
}

impl DrawListKind {
    pub fn select(skybox: bool, blend: bool, nolighting: bool) -> Self {
        match (skybox, blend, nolighting) {
            (true, true, _) => DrawListKind::SkyboxBlend,
            (true, false, _) => DrawListKind::SkyboxNoBlend,
            (false, true, _) => DrawListKind::NormalBlend,
            (false, false, true) => DrawListKind::NormalNoBlendNoLighting,
            (false, false, false) => DrawListKind::NormalNoBlend,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub normal_noblend: KeyedContainer<Drawable>,
    pub normal_blend: KeyedContainer<Drawable>,
    pub normal_noblend_nolighting: KeyedContainer<Drawable>,
    pub skybox_blend: KeyedContainer<Drawable>,
    pub skybox_noblend: KeyedContainer<Drawable>,
}

impl DrawList {
    pub fn get(&self, kind: DrawListKind) -> &KeyedContainer<Drawable> {
        match kind {
            DrawListKind::NormalNoBlend => &self.normal_noblend,
            DrawListKind::NormalBlend => &self.normal_blend,
            DrawListKind::NormalNoBlendNoLighting => &self.normal_noblend_nolighting,
            DrawListKind::SkyboxBlend => &self.skybox_blend,
            DrawListKind::SkyboxNoBlend => &self.skybox_noblend,
        }
    }

    pub fn get_mut(&mut self, kind: DrawListKind) -> &mut KeyedContainer<Drawable> {
        match kind {
            DrawListKind::NormalNoBlend => &mut self.normal_noblend,
            DrawListKind::NormalBlend => &mut self.normal_blend,
            DrawListKind::NormalNoBlendNoLighting => &mut self.normal_noblend_nolighting,
            DrawListKind::SkyboxBlend => &mut self.skybox_blend,
            DrawListKind::SkyboxNoBlend => &mut self.skybox_noblend,
        }
    }

    pub fn len(&self) -> usize {
        self.normal_noblend.len()
            + self.normal_blend.len()
            + self.normal_noblend_nolighting.len()
            + self.skybox_blend.len()
            + self.skybox_noblend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Drawable> {
        self.normal_noblend
            .iter()
            .chain(self.normal_blend.iter())
            .chain(self.normal_noblend_nolighting.iter())
            .chain(self.skybox_blend.iter())
            .chain(self.skybox_noblend.iter())
    }
}

/// A drawable that was handed to a draw list, so it can be found again.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DrawableRef {
    pub kind: DrawListKind,
    pub handle: Handle<Drawable>,
}

#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    pub transform: Transform,
    pub drawlist: DrawList,
    children: KeyedContainer<SceneNode>,
}

impl SceneNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self) -> Handle<SceneNode> {
        self.children.insert(SceneNode::new())
    }

    pub fn node(&self, handle: Handle<SceneNode>) -> Option<&SceneNode> {
        self.children.get(handle)
    }

    pub fn node_mut(&mut self, handle: Handle<SceneNode>) -> Option<&mut SceneNode> {
        self.children.get_mut(handle)
    }

    pub fn children(&self) -> impl Iterator<Item = &SceneNode> {
        self.children.iter()
    }

    pub fn add_drawable(&mut self, kind: DrawListKind, drawable: Drawable) -> DrawableRef {
        DrawableRef {
            kind,
            handle: self.drawlist.get_mut(kind).insert(drawable),
        }
    }

    pub fn drawable(&self, drawable: DrawableRef) -> Option<&Drawable> {
        self.drawlist.get(drawable.kind).get(drawable.handle)
    }

    /// Number of drawables in this node and all of its descendants.
    pub fn drawable_count(&self) -> usize {
        self.drawlist.len()
            + self
                .children
                .iter()
                .map(SceneNode::drawable_count)
                .sum::<usize>()
    }

    pub fn clear(&mut self) {
        self.transform = Transform::IDENTITY;
        self.drawlist = DrawList::default();
        self.children.clear();
    }
}
