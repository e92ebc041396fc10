use std::path::PathBuf;

use glam::Vec3;
use log::{debug, error, info, warn};

use crate::assembly::{create_assembly_animation, AnimationSettings, ComponentGroup, Timeline};
use crate::config::AssemblyConfig;
use crate::context::SceneContext;
use crate::render_settings::{setup_render_settings, RenderSettings};
use crate::rig::{compute_scene_bounds, setup_camera_and_lights, SceneBounds};

const BANNER_WIDTH: usize = 60;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub imported_files: usize,
    pub imported_objects: usize,
    pub skipped_files: Vec<PathBuf>,
    pub bounds: SceneBounds,
    pub timeline: Timeline,
    pub render: RenderSettings,
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    Completed(RunSummary),
    /// No part file produced any mesh; the scene was left without rig or animation.
    NothingImported { skipped_files: Vec<PathBuf> },
}

fn banner(title: &str) {
    info!("{}", "=".repeat(BANNER_WIDTH));
    info!("{title}");
    info!("{}", "=".repeat(BANNER_WIDTH));
}

/// Builds the whole assembly animation: reset, import, rig, animate, render setup.
pub fn run<C: SceneContext>(ctx: &mut C, config: &AssemblyConfig) -> anyhow::Result<RunOutcome> {
    banner("ASSEMBLY ANIMATION");

    info!("Clearing scene...");
    ctx.clear();

    let mut groups: Vec<ComponentGroup<C::ObjectId>> = Vec::new();
    let mut all_objects = Vec::new();
    let mut skipped_files = Vec::new();

    for (index, component) in config.components.iter().enumerate() {
        let path = config.asset_path(component);

        if !path.exists() {
            warn!("File not found: {}", path.display());
            skipped_files.push(path);
            continue;
        }

        info!("Importing: {}", component.file());
        let objects = ctx.import(&path)?;
        for &id in &objects {
            if let (Some(name), Some(shape)) = (ctx.object_name(id), ctx.object_shape(id)) {
                debug!("  {name} at {}", shape.position());
            }
        }
        all_objects.extend_from_slice(&objects);

        groups.push(ComponentGroup {
            name: component.display_name().to_string(),
            direction: Vec3::from(config.direction_for(index)),
            explode_distance: component
                .explode_distance()
                .unwrap_or(config.explode_distance),
            objects,
        });
    }

    if all_objects.is_empty() {
        error!("No objects imported!");
        return Ok(RunOutcome::NothingImported { skipped_files });
    }

    info!(
        "Imported {} objects from {} files",
        all_objects.len(),
        groups.len()
    );

    info!("Setting up camera and lights...");
    let Some(bounds) = compute_scene_bounds(ctx, &all_objects) else {
        error!("No mesh geometry among the imported objects!");
        return Ok(RunOutcome::NothingImported { skipped_files });
    };
    let rig = setup_camera_and_lights(ctx, bounds)?;
    debug!(
        "Rig: camera {:?}, sun {:?}, fill {:?}",
        rig.camera, rig.sun, rig.fill
    );

    info!("Creating animation...");
    let timeline = create_assembly_animation(ctx, &groups, &AnimationSettings::from(config))?;
    info!("Animation created: {} frames total", timeline.frame_end);

    info!("Configuring render...");
    let render = setup_render_settings(ctx, &config.render, &config.asset_folder);

    ctx.frame_set(1);

    banner("DONE");
    info!("Render the animation to write {}", render.filepath.display());

    Ok(RunOutcome::Completed(RunSummary {
        imported_files: groups.len(),
        imported_objects: all_objects.len(),
        skipped_files,
        bounds,
        timeline,
        render,
    }))
}
