use anyhow::Result;
use directories::ProjectDirs;
use log::info;
use std::path::PathBuf;

use library_tracker::backend::Backend;
use library_tracker::cli;

/// Data directory: `LIBRARY_TRACKER_DATA_DIR` wins, then the platform data
/// dir, then `./data` as a last resort.
fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LIBRARY_TRACKER_DATA_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(dirs) = ProjectDirs::from("", "", "library-tracker") {
        return dirs.data_local_dir().to_path_buf();
    }
    PathBuf::from("data")
}

fn main() -> Result<()> {
    env_logger::init();

    let data_dir = resolve_data_dir();
    info!("Using data directory {:?}", data_dir);

    let backend = Backend::new(&data_dir)?;
    cli::run(&backend)
}
