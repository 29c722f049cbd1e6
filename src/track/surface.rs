use log::{error, warn};
use track_files::config::types::ConfigTree;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SurfaceType {
    #[default]
    None,
    Asphalt,
    Grass,
    Gravel,
    Concrete,
    Sand,
    Cobbles,
}

impl SurfaceType {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "asphalt" => SurfaceType::Asphalt,
            "grass" => SurfaceType::Grass,
            "gravel" => SurfaceType::Gravel,
            "concrete" => SurfaceType::Concrete,
            "sand" => SurfaceType::Sand,
            "cobbles" => SurfaceType::Cobbles,
            "none" => SurfaceType::None,
            other => {
                warn!("Unknown surface type {}, using none", other);
                SurfaceType::None
            }
        }
    }
}

/// Contact properties of one surface. `bump_wave_length` is always positive.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSurface {
    pub name: String,
    pub surface_type: SurfaceType,
    pub bump_wave_length: f32,
    pub bump_amplitude: f32,
    pub friction_non_tread: f32,
    pub friction_tread: f32,
    pub roll_resistance_coefficient: f32,
    pub rolling_drag: f32,
}

impl Default for TrackSurface {
    fn default() -> Self {
        Self {
            name: String::from("default"),
            surface_type: SurfaceType::None,
            bump_wave_length: 1.0,
            bump_amplitude: 0.0,
            friction_non_tread: 1.0,
            friction_tread: 1.0,
            roll_resistance_coefficient: 0.0,
            rolling_drag: 0.0,
        }
    }
}

impl TrackSurface {
    pub fn from_config(name: &str, section: &ConfigTree) -> Self {
        let defaults = TrackSurface::default();

        let mut bump_wave_length = section.get_or("BumpWaveLength", defaults.bump_wave_length);
        if bump_wave_length <= 0.0 {
            error!(
                "Surface {}: BumpWaveLength must be positive, got {}. Using 1.0",
                name, bump_wave_length
            );
            bump_wave_length = 1.0;
        }

        Self {
            name: name.to_string(),
            surface_type: section
                .get::<String>("Type")
                .map(|t| SurfaceType::from_name(&t))
                .unwrap_or_default(),
            bump_wave_length,
            bump_amplitude: section.get_or("BumpAmplitude", defaults.bump_amplitude),
            friction_non_tread: section.get_or("FrictionNonTread", defaults.friction_non_tread),
            friction_tread: section.get_or("FrictionTread", defaults.friction_tread),
            roll_resistance_coefficient: section
                .get_or("RollResistanceCoefficient", defaults.roll_resistance_coefficient),
            rolling_drag: section.get_or("RollingDrag", defaults.rolling_drag),
        }
    }
}

/// Builds the surface table from `surfaces.txt`, one entry per top level section whose name
/// starts with `surface`, in file order. Never returns an empty table.
pub fn build_surface_table(config: Option<&ConfigTree>) -> Vec<TrackSurface> {
    let mut surfaces: Vec<TrackSurface> = config
        .into_iter()
        .flat_map(|tree| tree.children())
        .filter(|(name, section)| name.starts_with("surface") && section.has_children())
        .map(|(name, section)| TrackSurface::from_config(name, section))
        .collect();

    if surfaces.is_empty() {
        warn!("No surfaces declared, using the default surface");
        surfaces.push(TrackSurface::default());
    }

    surfaces
}
