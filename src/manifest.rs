//! JSON description of a built scene, so a run leaves something inspectable
//! behind without a host application.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::assembly::Timeline;
use crate::pipeline::RunSummary;
use crate::render_settings::RenderSettings;
use crate::rig::SceneBounds;
use crate::scene_graph::animation::Action;
use crate::scene_graph::object3d::{LightType, ObjectKind};
use crate::scene_graph::Scene;

#[derive(Debug, Serialize)]
pub struct SceneManifest<'a> {
    pub frame_start: i32,
    pub frame_end: i32,
    pub frame_current: i32,
    pub active_camera: Option<&'a str>,
    pub bounds: Option<SceneBounds>,
    pub timeline: Option<&'a Timeline>,
    pub render: &'a RenderSettings,
    pub collections: Vec<CollectionEntry<'a>>,
    pub objects: Vec<ObjectEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct CollectionEntry<'a> {
    pub name: &'a str,
    pub objects: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectData {
    Mesh { bound_min: [f32; 3], bound_max: [f32; 3] },
    Empty,
    Camera { lens_mm: f32 },
    Light { light_type: &'static str, energy: f32, size: f32 },
}

#[derive(Debug, Serialize)]
pub struct ObjectEntry<'a> {
    pub name: &'a str,
    pub parent: Option<&'a str>,
    pub location: [f32; 3],
    /// Extrinsic XYZ Euler angles, radians.
    pub rotation_euler: [f32; 3],
    pub scale: [f32; 3],
    pub data: ObjectData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<&'a Action>,
}

impl<'a> SceneManifest<'a> {
    pub fn from_scene(scene: &'a Scene, summary: Option<&'a RunSummary>) -> Self {
        let name_of = move |id| scene.get_object(id).map(|object| object.name.as_str());

        let objects = scene
            .objects
            .iter()
            .map(|(_, object)| ObjectEntry {
                name: &object.name,
                parent: object.parent_id.and_then(name_of),
                location: object.transform.translation().to_array(),
                rotation_euler: object.transform.rotation_euler().to_array(),
                scale: object.transform.scale().to_array(),
                data: object_data(&object.kind),
                animation: object.animation.as_ref(),
            })
            .collect();

        let collections = scene
            .collections
            .iter()
            .map(|collection| CollectionEntry {
                name: &collection.name,
                objects: collection
                    .object_ids
                    .iter()
                    .filter_map(|&id| name_of(id))
                    .collect(),
            })
            .collect();

        Self {
            frame_start: scene.frame_start,
            frame_end: scene.frame_end,
            frame_current: scene.frame_current,
            active_camera: scene.active_camera.and_then(name_of),
            bounds: summary.map(|summary| summary.bounds),
            timeline: summary.map(|summary| &summary.timeline),
            render: scene.render_settings(),
            collections,
            objects,
        }
    }

    pub fn write(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize scene")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

fn object_data(kind: &ObjectKind) -> ObjectData {
    match kind {
        ObjectKind::Mesh { bounds } => ObjectData::Mesh {
            bound_min: bounds.min.to_array(),
            bound_max: bounds.max.to_array(),
        },
        ObjectKind::Empty => ObjectData::Empty,
        ObjectKind::Camera(camera) => ObjectData::Camera {
            lens_mm: camera.lens_mm,
        },
        ObjectKind::Light(light) => ObjectData::Light {
            light_type: match light.light_type {
                LightType::Sun => "SUN",
                LightType::Area => "AREA",
            },
            energy: light.energy,
            size: light.size,
        },
    }
}
