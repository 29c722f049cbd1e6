use glam::Vec3;
use log::trace;
use track_files::config::types::ConfigTree;
use track_files::legacy::reader::ObjectListReader;
use track_files::legacy::types::ObjectRecord;

use crate::rendering::common::coordinate_systems::euler_degrees_to_quat;
use crate::rendering::scene::node::Transform;

/// One entry of the structured object list.
#[derive(Debug, Clone)]
pub struct NodeEntry {
    pub name: String,
    /// Either an inline body section or a value naming a body file.
    pub body: Option<ConfigTree>,
    /// `None` when neither position nor rotation were given.
    pub transform: Option<Transform>,
}

#[derive(Debug, Clone)]
pub enum ObjectEntry {
    Node(NodeEntry),
    Record(ObjectRecord),
}

/// Enumerates the objects of a track, one per call.
pub trait ObjectSource {
    fn num_objects(&self) -> usize;

    fn next_entry(&mut self) -> Option<ObjectEntry>;
}

/// The `object` sections of `objects.txt`, in file order.
pub struct NodeSource {
    nodes: Vec<(String, ConfigTree)>,
    position: usize,
}

impl NodeSource {
    /// `None` if the file declares no `object` section.
    pub fn new(objects: &ConfigTree) -> Option<Self> {
        let nodes = objects.child("object")?;
        Some(Self {
            nodes: nodes
                .children()
                .map(|(name, node)| (name.to_string(), node.clone()))
                .collect(),
            position: 0,
        })
    }
}

impl ObjectSource for NodeSource {
    fn num_objects(&self) -> usize {
        self.nodes.len()
    }

    fn next_entry(&mut self) -> Option<ObjectEntry> {
        let (name, node) = self.nodes.get(self.position)?;
        self.position += 1;

        let position = node.get::<[f32; 3]>("position");
        let rotation = node.get::<[f32; 3]>("rotation");
        let transform = (position.is_some() || rotation.is_some()).then(|| {
            Transform::new(
                position.map(Vec3::from).unwrap_or(Vec3::ZERO),
                euler_degrees_to_quat(rotation.unwrap_or([0.0; 3])),
            )
        });

        Some(ObjectEntry::Node(NodeEntry {
            name: name.clone(),
            body: node.child("body").cloned(),
            transform,
        }))
    }
}

/// The records of `list.txt`, after its header was validated.
pub struct LegacyListSource {
    reader: ObjectListReader,
    num_objects: usize,
}

impl LegacyListSource {
    pub fn new(text: String) -> Result<Self, anyhow::Error> {
        let num_objects = ObjectListReader::count_records(&text);
        let mut reader = ObjectListReader::new(text);
        let params = reader.read_header()?;
        trace!("Object list with {} params per object, {} objects", params, num_objects);

        Ok(Self { reader, num_objects })
    }
}

impl ObjectSource for LegacyListSource {
    fn num_objects(&self) -> usize {
        self.num_objects
    }

    fn next_entry(&mut self) -> Option<ObjectEntry> {
        self.reader.next_record().map(ObjectEntry::Record)
    }
}
