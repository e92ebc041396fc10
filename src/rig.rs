use glam::Vec3;
use log::info;
use serde::Serialize;

use crate::context::{ObjectShape, SceneContext};
use crate::math::{track_to_neg_z_up_y, AABB};
use crate::scene_graph::object3d::{LightData, LightType};

pub const CAMERA_NAME: &str = "Assembly_Camera";
pub const SUN_NAME: &str = "Main_Light";
pub const FILL_NAME: &str = "Fill_Light";

const CAMERA_OFFSET: Vec3 = Vec3::new(1.5, -1.5, 0.8);
const SUN_OFFSET: Vec3 = Vec3::new(1.0, 1.0, 2.0);
const FILL_OFFSET: Vec3 = Vec3::new(-1.0, 0.0, 0.5);
const SUN_ENERGY: f32 = 3.0;
const FILL_ENERGY: f32 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneBounds {
    pub center: Vec3,
    /// Largest axis extent of the world-space box.
    pub size: f32,
}

/// World-space box over every mesh among `objects`, or `None` without meshes.
pub fn compute_scene_bounds<C: SceneContext>(ctx: &C, objects: &[C::ObjectId]) -> Option<SceneBounds> {
    let mut world = AABB::empty();

    for &id in objects {
        if let Some(ObjectShape::Mesh {
            bound_box,
            matrix_world,
            ..
        }) = ctx.object_shape(id)
        {
            world.extend_transformed_corners(&bound_box, &matrix_world);
        }
    }

    if world.is_empty() {
        return None;
    }

    Some(SceneBounds {
        center: world.center(),
        size: world.largest_extent(),
    })
}

pub struct Rig<Id> {
    pub camera: Id,
    pub sun: Id,
    pub fill: Id,
}

/// Frames the bounds with a diagonal camera, a sun and an area fill light.
pub fn setup_camera_and_lights<C: SceneContext>(
    ctx: &mut C,
    bounds: SceneBounds,
) -> anyhow::Result<Rig<C::ObjectId>> {
    let SceneBounds { center, size } = bounds;

    let camera_position = center + CAMERA_OFFSET * size;
    let camera_rotation = track_to_neg_z_up_y(center - camera_position);
    let camera = ctx.create_camera(CAMERA_NAME, camera_position, camera_rotation);
    ctx.set_active_camera(camera)?;

    let sun = ctx.create_light(
        SUN_NAME,
        LightData::new(LightType::Sun, SUN_ENERGY),
        center + SUN_OFFSET * size,
    );

    let fill = ctx.create_light(
        FILL_NAME,
        LightData::new(LightType::Area, FILL_ENERGY).with_size(size * 0.5),
        center + FILL_OFFSET * size,
    );

    info!("Scene center: {center}");
    info!("Scene size: {size}");

    Ok(Rig { camera, sun, fill })
}
