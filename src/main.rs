use std::path::PathBuf;

use anyhow::{Context, Result};
use itertools::Itertools;
use log::{info, warn};

mod assembly;
mod config;
mod context;
mod importer;
mod manifest;
mod math;
mod pipeline;
mod render_settings;
mod rig;
mod scene_graph;
#[cfg(test)]
mod test_support;

use config::AssemblyConfig;
use manifest::SceneManifest;
use pipeline::RunOutcome;
use scene_graph::Scene;

fn main() -> Result<()> {
    let mut logger = pretty_env_logger::formatted_builder();
    logger.parse_filters(&std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()));
    logger.try_init()?;

    let config_file = std::env::args().nth(1).map(PathBuf::from);
    let config = AssemblyConfig::load(config_file.as_deref())?;

    let mut scene = Scene::with_host_version(config.host_version);
    scene.convert_y_up = config.convert_y_up;

    let summary = match pipeline::run(&mut scene, &config)? {
        RunOutcome::Completed(summary) => summary,
        RunOutcome::NothingImported { .. } => return Ok(()),
    };

    info!(
        "{} files, {} objects imported, {} files skipped",
        summary.imported_files,
        summary.imported_objects,
        summary.skipped_files.len()
    );
    info!(
        "Frames 1..={}, {} objects in scene, video to {}",
        summary.timeline.frame_end,
        scene.object_count(),
        summary.render.filepath.display()
    );

    if !summary.skipped_files.is_empty() {
        warn!(
            "Missing parts: {}",
            summary
                .skipped_files
                .iter()
                .map(|path| path.display())
                .join(", ")
        );
    }

    if let Some(path) = config.manifest_path() {
        SceneManifest::from_scene(&scene, Some(&summary))
            .write(&path)
            .context("Failed to export scene manifest")?;
        info!("Scene manifest: {}", path.display());
    }

    Ok(())
}
