use clap::Parser;
use log::trace;
use trackloader::content::ContentCache;
use trackloader::io::fs::loader::FsLoader;
use trackloader::physics::physics_simulator::PhysicsSimulator;
use trackloader::settings::{CliArgs, LoaderSettings};
use trackloader::{LoadProgress, TrackData, TrackLoader};

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let args = CliArgs::parse();
    trace!("Starting with args: {:?}", args);

    let fs_loader = FsLoader::new(&args.data_dir);
    let content = ContentCache::new();
    let mut simulator = PhysicsSimulator::new();
    let mut track = TrackData::new();

    {
        let mut loader = TrackLoader::new(
            &fs_loader,
            &content,
            &mut simulator,
            &mut track,
            LoaderSettings::from(&args),
        );

        loader.begin_load()?;
        while loader.continue_load()? == LoadProgress::Progressed {
            trace!("Loaded {}/{} objects", loader.num_loaded(), loader.num_objects());
        }
    }

    for _ in 0..args.simulate_steps {
        simulator.step();
        track.update_dynamic_objects(&simulator);
    }

    println!(
        "{}: {} surfaces, {} roads, {} lap sectors ({:.1} m), {} start positions",
        args.track,
        track.surfaces.len(),
        track.roads.len(),
        track.lap.len(),
        track.lap_length,
        track.start_positions.len()
    );
    println!(
        "{} static drawables, {} dynamic drawables, {} colliders, {} rigid bodies",
        track.static_node.drawable_count(),
        track.dynamic_node.drawable_count(),
        simulator.collider_count(),
        simulator.rigid_body_count()
    );

    Ok(())
}
