use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, anyhow, bail};
use glam::{Quat, Vec3};
use log::{debug, error, info, trace, warn};
use track_files::config::reader::ConfigReader;
use track_files::config::types::ConfigTree;
use track_files::legacy::types::ObjectRecord;
use track_files::roads::reader::RoadsReader;

use crate::content::ContentCache;
use crate::io::common::loader::{RawAssetLoader, join_path, parent_dir};
use crate::io::pack::loader::PackLoader;
use crate::physics::collider_factory::ColliderFactory;
use crate::physics::motion_state::MotionState;
use crate::physics::physics_simulator::PhysicsSimulator;
use crate::rendering::common::types::{Model, TextureInfo};
use crate::rendering::scene::drawable::Drawable;
use crate::rendering::scene::node::{DrawListKind, SceneNode, Transform};
use crate::settings::LoaderSettings;
use crate::track::assets::TrackAssets;
use crate::track::body::{Body, BodyOptions};
use crate::track::combiner::StaticCombiner;
use crate::track::object::Object;
use crate::track::racing_line::{CentreLineSolver, RacingLineSolver, build_racing_line_mesh};
use crate::track::road::road_strip::RoadStrip;
use crate::track::source::{LegacyListSource, NodeEntry, NodeSource, ObjectEntry, ObjectSource};
use crate::track::start_lap::{compute_distances, load_lap_sequence, load_start_positions};
use crate::track::surface::build_surface_table;
use crate::track::track_data::{DynamicObject, TrackData, TrackObject};

pub const RACING_LINE_TEXTURE: &str = "racingline.png";
pub const OBJECT_PACK: &str = "objects.jpk";

/// Where the loader currently is. `begin_load` runs through everything up to the object
/// enumeration, every `continue_load` then handles a single object or combined entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    Fresh,
    SurfacesLoaded,
    RoadsLoaded,
    RacingLineBuilt,
    StartPositionsLoaded,
    LapSectionsLoaded,
    ObjectEnumerationChosen,
    NodeProcessing,
    LegacyProcessing,
    Flushing,
    Loaded,
    Error,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadProgress {
    Progressed,
    Finished,
}

/// Incrementally loads a track into the caller's [`TrackData`], scene graph and physics world.
pub struct TrackLoader<'a> {
    loader: &'a dyn RawAssetLoader,
    content: &'a ContentCache,
    simulator: &'a mut PhysicsSimulator,
    data: &'a mut TrackData,
    settings: LoaderSettings,
    solver: Box<dyn RacingLineSolver>,

    phase: LoadPhase,
    source: Option<Box<dyn ObjectSource>>,
    pack: Option<PackLoader>,
    bodies: HashMap<String, Body>,
    combiner: StaticCombiner,
    num_objects: usize,
    num_loaded: usize,
}

impl<'a> TrackLoader<'a> {
    pub fn new(
        loader: &'a dyn RawAssetLoader,
        content: &'a ContentCache,
        simulator: &'a mut PhysicsSimulator,
        data: &'a mut TrackData,
        settings: LoaderSettings,
    ) -> Self {
        data.reverse = settings.reverse;
        Self {
            loader,
            content,
            simulator,
            data,
            settings,
            solver: Box::new(CentreLineSolver::default()),
            phase: LoadPhase::Fresh,
            source: None,
            pack: None,
            bodies: HashMap::new(),
            combiner: StaticCombiner::new(),
            num_objects: 0,
            num_loaded: 0,
        }
    }

    pub fn with_solver(mut self, solver: Box<dyn RacingLineSolver>) -> Self {
        self.solver = solver;
        self
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn num_objects(&self) -> usize {
        self.num_objects
    }

    pub fn num_loaded(&self) -> usize {
        self.num_loaded
    }

    /// Loads everything but the objects and picks the object list format. Errors are load-fatal,
    /// the loader is unusable afterwards.
    pub fn begin_load(&mut self) -> Result<(), anyhow::Error> {
        profiling::scope!("TrackLoader::begin_load");
        self.clear();
        self.phase = LoadPhase::Fresh;

        let result = self.begin();
        if let Err(err) = &result {
            error!("Loading track {} failed: {:#}", self.settings.track_path, err);
            self.phase = LoadPhase::Error;
        }
        result
    }

    /// Does one unit of work: one object, or one combined entry once all objects are through.
    /// Errors are load-fatal and repeat on every further call.
    pub fn continue_load(&mut self) -> Result<LoadProgress, anyhow::Error> {
        profiling::scope!("TrackLoader::continue_load");
        match self.phase {
            LoadPhase::Loaded => return Ok(LoadProgress::Finished),
            LoadPhase::Error => bail!("Loading track {} failed", self.settings.track_path),
            LoadPhase::NodeProcessing | LoadPhase::LegacyProcessing | LoadPhase::Flushing => {}
            phase => bail!("continue_load called in phase {:?}, call begin_load first", phase),
        }

        let result = self.step();
        if let Err(err) = &result {
            error!("Loading track {} failed: {:#}", self.settings.track_path, err);
            self.phase = LoadPhase::Error;
            self.clear();
        }
        result
    }

    fn clear(&mut self) {
        self.source = None;
        self.pack = None;
        self.bodies.clear();
        self.combiner.clear();
    }

    fn assets(&self) -> TrackAssets<'a> {
        TrackAssets {
            loader: self.loader,
            content: self.content,
            pack: self.pack.clone(),
            objects_dir: self.settings.objects_dir(),
            anisotropy: self.settings.anisotropy,
        }
    }

    fn track_file(&self, name: &str) -> String {
        join_path(&self.settings.track_path, name)
    }

    fn begin(&mut self) -> Result<(), anyhow::Error> {
        info!("Loading track from path: {}", self.settings.track_path);

        self.load_surfaces()?;
        self.phase = LoadPhase::SurfacesLoaded;

        if let Err(err) = self.load_roads() {
            error!("Error during road loading; continuing with an unsmoothed track: {:#}", err);
            self.data.roads.clear();
        }
        self.phase = LoadPhase::RoadsLoaded;

        self.create_racing_lines();
        self.phase = LoadPhase::RacingLineBuilt;

        let info_path = self.track_file("track.txt");
        let info_buf = self
            .loader
            .load_raw_owned(&info_path)
            .ok_or_else(|| anyhow!("Can't find track configfile: {}", info_path))?;
        let info = ConfigReader::parse_bytes(&info_buf).with_context(|| format!("Parsing {}", info_path))?;

        self.data.vertical_tracking_skyboxes = info.get_or("vertical tracking skyboxes", false);
        self.data.cull = info.get_or("cull faces", false);

        self.data.start_positions = load_start_positions(&info, self.data.reverse);
        if self.data.start_positions.is_empty() {
            bail!("No start positions in {}", info_path);
        }
        self.phase = LoadPhase::StartPositionsLoaded;

        self.load_lap_sections(&info)?;
        self.phase = LoadPhase::LapSectionsLoaded;

        self.begin_object_load()
    }

    fn load_surfaces(&mut self) -> Result<(), anyhow::Error> {
        let path = self.track_file("surfaces.txt");
        let Some(buf) = self.loader.load_raw_owned(&path) else {
            info!("No Surfaces File. Continuing with standard surfaces");
            self.data.surfaces = build_surface_table(None);
            return Ok(());
        };

        let config = ConfigReader::parse_bytes(&buf).with_context(|| format!("Parsing {}", path))?;
        self.data.surfaces = build_surface_table(Some(&config));
        info!("Loaded surfaces file, {} surfaces.", self.data.surfaces.len());
        Ok(())
    }

    fn load_roads(&mut self) -> Result<(), anyhow::Error> {
        let path = self.track_file("roads.trk");
        let buf = self
            .loader
            .load_raw_owned(&path)
            .ok_or_else(|| anyhow!("Can't find {}", path))?;

        let assets = RoadsReader::parse_asset(buf).with_context(|| format!("Parsing {}", path))?;
        self.data.roads = assets
            .iter()
            .map(|asset| RoadStrip::from_asset(asset, self.data.reverse))
            .collect();

        info!("Loaded {} roads", self.data.roads.len());
        Ok(())
    }

    fn create_racing_lines(&mut self) {
        let texture_path = join_path(&self.settings.texture_dir, RACING_LINE_TEXTURE);
        let info = TextureInfo {
            mipmap: true,
            anisotropy: self.settings.anisotropy,
            ..TextureInfo::default()
        };
        match self.assets().load_texture_at(&texture_path, info) {
            Ok(texture) => self.data.racingline_texture = Some(texture),
            Err(err) => warn!("Racing line texture unavailable: {:#}", err),
        }

        for road in self.data.roads.iter_mut() {
            if !self.solver.solve(road) {
                warn!("Could not solve the racing line of a road with {} patches", road.len());
            }

            let mesh = build_racing_line_mesh(road);
            if mesh.is_empty() {
                continue;
            }

            let model = Arc::new(Model::new(mesh));
            let mut drawable = Drawable::new(model.clone());
            drawable.diffuse = self.data.racingline_texture.clone();
            drawable.decal = true;
            self.data
                .racingline_node
                .add_drawable(DrawListKind::NormalBlend, drawable);
            self.data.models.push(model);
        }
    }

    fn load_lap_sections(&mut self, info: &ConfigTree) -> Result<(), anyhow::Error> {
        let lap = load_lap_sequence(
            info,
            &self.data.roads,
            self.data.reverse,
            self.data.start_positions.first(),
        )?;

        self.data.lap_length = match lap.first() {
            Some(&start) => compute_distances(&mut self.data.roads, start),
            None => 0.0,
        };
        debug!("Lap with {} sectors, {} m", lap.len(), self.data.lap_length);
        self.data.lap = lap;
        Ok(())
    }

    fn begin_object_load(&mut self) -> Result<(), anyhow::Error> {
        self.phase = LoadPhase::ObjectEnumerationChosen;
        let objects_dir = self.settings.objects_dir();

        let pack_path = join_path(&objects_dir, OBJECT_PACK);
        self.pack = match PackLoader::open(self.loader, &pack_path, &objects_dir) {
            Ok(Some(pack)) => {
                info!("Loaded object pack {} with {} files", pack_path, pack.len());
                Some(pack)
            }
            Ok(None) => {
                debug!("No object pack, loading objects from {}", objects_dir);
                None
            }
            Err(err) => {
                warn!("Ignoring unreadable object pack {}: {:#}", pack_path, err);
                None
            }
        };

        let objects_path = join_path(&objects_dir, "objects.txt");
        let node_source = self
            .loader
            .load_raw_owned(&objects_path)
            .and_then(|buf| match ConfigReader::parse_bytes(&buf) {
                Ok(config) => NodeSource::new(&config),
                Err(err) => {
                    warn!("Ignoring unreadable {}: {}", objects_path, err);
                    None
                }
            });

        let (source, phase): (Box<dyn ObjectSource>, LoadPhase) = match node_source {
            Some(source) => (Box::new(source), LoadPhase::NodeProcessing),
            None => {
                let list_path = join_path(&objects_dir, "list.txt");
                let buf = self
                    .loader
                    .load_raw_owned(&list_path)
                    .ok_or_else(|| anyhow!("Neither objects.txt nor {} found", list_path))?;
                let text = String::from_utf8(buf).with_context(|| format!("Reading {}", list_path))?;
                let source = LegacyListSource::new(text).with_context(|| format!("Reading {}", list_path))?;
                (Box::new(source), LoadPhase::LegacyProcessing)
            }
        };

        self.num_objects = source.num_objects();
        self.num_loaded = 0;
        info!("Loading {} objects ({:?})", self.num_objects, phase);
        self.source = Some(source);
        self.phase = phase;
        Ok(())
    }

    fn step(&mut self) -> Result<LoadProgress, anyhow::Error> {
        if self.phase != LoadPhase::Flushing {
            let entry = self.source.as_mut().and_then(|source| source.next_entry());
            if let Some(entry) = entry {
                self.num_loaded += 1;
                match entry {
                    ObjectEntry::Node(node) => self.load_node(node)?,
                    ObjectEntry::Record(record) => self.load_record(record),
                }
                return Ok(LoadProgress::Progressed);
            }

            self.source = None;
            self.phase = LoadPhase::Flushing;
        }

        let objects_dir = self.settings.objects_dir();
        if let Some(object) = self.combiner.pop(self.content, &objects_dir) {
            if let Err(err) = self.add_object(&object) {
                info!("Skipping combined object {}: {:#}", object.texture, err);
            }
            return Ok(LoadProgress::Progressed);
        }

        self.finish();
        Ok(LoadProgress::Finished)
    }

    fn finish(&mut self) {
        info!(
            "Track {} loaded: {} objects, {} colliders",
            self.settings.track_path,
            self.data.objects.len(),
            self.simulator.collider_count()
        );
        self.data.set_loaded();
        self.phase = LoadPhase::Loaded;
        self.clear();
    }

    fn body_options(&self) -> BodyOptions {
        BodyOptions {
            cull: self.data.cull,
            vertical_tracking_skyboxes: self.data.vertical_tracking_skyboxes,
            dynamic_shadows: self.settings.dynamic_shadows,
            num_surfaces: self.data.surfaces.len(),
        }
    }

    fn load_node(&mut self, node: NodeEntry) -> Result<(), anyhow::Error> {
        let body_cfg = node
            .body
            .ok_or_else(|| anyhow!("Object {} has no body", node.name))?;

        // inline bodies are named after their object, external ones after their file
        let name = if body_cfg.has_children() {
            node.name.clone()
        } else {
            body_cfg.value().to_string()
        };

        if !self.bodies.contains_key(&name) {
            let Some(body) = self.load_body(&name, &body_cfg) else {
                return Ok(());
            };
            self.data.models.push(body.drawable.model.clone());
            self.bodies.insert(name.clone(), body);
        }

        let Some(body) = self.bodies.get(&name).cloned() else {
            return Ok(());
        };
        self.place_body(&body, node.transform);
        Ok(())
    }

    /// `None` if the body is skipped, which only affects the objects using it.
    fn load_body(&self, name: &str, body_cfg: &ConfigTree) -> Option<Body> {
        let assets = self.assets();
        let options = self.body_options();

        let result = if body_cfg.has_children() {
            Body::load(&assets, body_cfg, "", &options)
        } else {
            self.read_body_file(&assets, name)
                .and_then(|cfg| Body::load(&assets, &cfg, parent_dir(name), &options))
        };

        match result {
            Ok(body) => body,
            Err(err) => {
                info!("Failed to load body {}: {:#}", name, err);
                None
            }
        }
    }

    fn read_body_file(&self, assets: &TrackAssets, name: &str) -> Result<ConfigTree, anyhow::Error> {
        let path = assets.path(name);
        let buf = self
            .loader
            .load_raw_owned(&path)
            .ok_or_else(|| anyhow!("Body file {} not found", path))?;
        Ok(ConfigReader::parse_bytes(&buf)?)
    }

    fn place_body(&mut self, body: &Body, transform: Option<Transform>) {
        if body.is_static() {
            let placement = transform.unwrap_or_default();
            match transform {
                // instanced static geometry
                Some(transform) => {
                    let handle = self.data.static_node.add_node();
                    if let Some(node) = self.data.static_node.node_mut(handle) {
                        node.transform = transform;
                        add_body(node, body);
                    }
                }
                // pre-transformed static geometry
                None => add_body(&mut self.data.static_node, body),
            }

            if body.collidable {
                self.add_static_collider(body, placement);
            }
            return;
        }

        // the body rotates about its mass centre, not about the model origin
        let Transform {
            translation,
            rotation,
        } = transform.unwrap_or_default();
        let position = translation - body.center + rotation * body.center;
        let placement = Transform::new(position, rotation);

        if self.settings.dynamic_objects {
            self.add_dynamic_body(body, placement);
        } else {
            self.add_static_collider(body, placement);
            let handle = self.data.static_node.add_node();
            if let Some(node) = self.data.static_node.node_mut(handle) {
                node.transform = placement;
                add_body(node, body);
            }
        }
    }

    fn add_static_collider(&mut self, body: &Body, placement: Transform) {
        let Some(shape) = body.shape.clone() else {
            return;
        };

        let collider = ColliderFactory::static_collider(
            shape.clone(),
            (placement.translation, placement.rotation).into(),
            body.surface,
        );
        let handle = self.simulator.insert_static_collider(collider);
        self.data.shapes.push(shape);
        self.data.objects.push(TrackObject::Static(handle));
    }

    fn add_dynamic_body(&mut self, body: &Body, placement: Transform) {
        let (Some(shape), Some(mass_properties)) = (body.shape.clone(), body.mass_properties) else {
            warn!("Massive body without a collision shape, not simulating it");
            return;
        };

        let motion_state = MotionState::new(placement.translation, placement.rotation, -body.center);
        let rigid_body = ColliderFactory::dynamic_body(motion_state.body_isometry());
        let (body_handle, _) = self.simulator.insert_dynamic_body(
            rigid_body,
            [ColliderFactory::dynamic_collider(shape.clone(), mass_properties)],
        );

        let node_handle = self.data.dynamic_node.add_node();
        if let Some(node) = self.data.dynamic_node.node_mut(node_handle) {
            node.transform = placement;
            add_body(node, body);
        }

        trace!("Dynamic body at {} ({:?})", placement.translation, body_handle);
        self.data.shapes.push(shape);
        self.data.objects.push(TrackObject::Dynamic(body_handle));
        self.data.dynamic_objects.push(DynamicObject {
            body: body_handle,
            node: node_handle,
            motion_state,
        });
    }

    fn load_record(&mut self, record: ObjectRecord) {
        if record.isashadow && self.settings.dynamic_shadows {
            debug!("Skipping shadow object {}", record.model);
            return;
        }

        let model = match self.assets().load_model(&record.model) {
            Ok(model) => model,
            Err(err) => {
                info!("Skipping object {}: {:#}", record.model, err);
                return;
            }
        };

        let object = Object::new(record, model);
        if self.settings.aggressive_combining && object.is_combinable() {
            let objects_dir = self.settings.objects_dir();
            self.combiner.add(object, self.content, &objects_dir);
            return;
        }

        if let Err(err) = self.add_object(&object) {
            info!("Skipping object with texture {}: {:#}", object.texture, err);
        }
    }

    /// Turns a legacy object into a drawable of the static node and, if collideable, a static
    /// collider at the identity transform.
    fn add_object(&mut self, object: &Object) -> Result<(), anyhow::Error> {
        let assets = self.assets();
        let mut info = assets.texture_info(object.mipmap, object.clamp_texture);
        let diffuse = assets.load_texture(&object.texture, info)?;

        let misc1_name = object.misc_texture_name(1);
        let misc1 = assets
            .exists(&misc1_name)
            .then(|| assets.load_texture(&misc1_name, info))
            .transpose()?;

        info.normalmap = true;
        let misc2_name = object.misc_texture_name(2);
        let misc2 = assets
            .exists(&misc2_name)
            .then(|| assets.load_texture(&misc2_name, info))
            .transpose()?;

        let collider = if object.collideable {
            let surface = match usize::try_from(object.surface) {
                Ok(surface) if surface < self.data.surfaces.len() => surface,
                _ => {
                    warn!("Object {} uses unknown surface {}, using 0", object.texture, object.surface);
                    0
                }
            };
            Some((ColliderFactory::trimesh_shape(object.model.mesh())?, surface))
        } else {
            None
        };

        let transparent = object.is_transparent();
        let mut drawable = Drawable::new(object.model.clone());
        drawable.diffuse = Some(diffuse);
        drawable.misc1 = misc1;
        drawable.misc2 = misc2;
        drawable.decal = transparent;
        drawable.cull = self.data.cull && !object.is_double_sided();
        drawable.skybox = object.skybox;
        drawable.vertical_track = object.skybox && self.data.vertical_tracking_skyboxes;

        let kind = DrawListKind::select(object.skybox, transparent, object.nolighting);
        self.data.static_node.add_drawable(kind, drawable);
        self.data.models.push(object.model.clone());

        if let Some((shape, surface)) = collider {
            let collider = ColliderFactory::static_collider(shape.clone(), (Vec3::ZERO, Quat::IDENTITY).into(), surface);
            let handle = self.simulator.insert_static_collider(collider);
            self.data.shapes.push(shape);
            self.data.objects.push(TrackObject::Static(handle));
        }

        Ok(())
    }

    /// Runs the whole load in one go, e.g. for tools and tests.
    pub fn load_all(&mut self) -> Result<(), anyhow::Error> {
        self.begin_load()?;
        while self.continue_load()? == LoadProgress::Progressed {}
        Ok(())
    }
}

fn add_body(node: &mut SceneNode, body: &Body) {
    node.add_drawable(body.drawlist, body.drawable.clone());
}
