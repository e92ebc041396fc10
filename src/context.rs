//! The capabilities the assembly pipeline needs from a 3D host.
//!
//! The pipeline never touches a concrete scene; every stage receives a
//! `&mut impl SceneContext`. [`crate::scene_graph::Scene`] is the in-memory
//! implementation.

use std::fmt::Debug;
use std::hash::Hash;
use std::path::Path;

use glam::{Mat4, Quat, Vec3};

use crate::render_settings::{HostVersion, RenderSettings};
use crate::scene_graph::easing::{Easing, Interpolation};
use crate::scene_graph::object3d::LightData;

/// What the bounds and animation stages need to know about an object.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectShape {
    Mesh {
        /// Local bounding-box corners.
        bound_box: [Vec3; 8],
        matrix_world: Mat4,
        position: Vec3,
    },
    Other {
        position: Vec3,
    },
}

impl ObjectShape {
    pub fn position(&self) -> Vec3 {
        match self {
            ObjectShape::Mesh { position, .. } | ObjectShape::Other { position } => *position,
        }
    }
}

pub trait SceneContext {
    type ObjectId: Copy + Eq + Hash + Debug;

    /// Removes every object and every collection except the default one.
    fn clear(&mut self);

    /// Imports a file and returns exactly the objects the import created.
    fn import(&mut self, path: &Path) -> anyhow::Result<Vec<Self::ObjectId>>;

    fn object_shape(&self, id: Self::ObjectId) -> Option<ObjectShape>;

    fn object_name(&self, id: Self::ObjectId) -> Option<&str>;

    fn create_camera(&mut self, name: &str, position: Vec3, rotation: Quat) -> Self::ObjectId;

    fn set_active_camera(&mut self, id: Self::ObjectId) -> anyhow::Result<()>;

    fn create_light(&mut self, name: &str, light: LightData, position: Vec3) -> Self::ObjectId;

    /// Sets the object's location, relative to its parent.
    fn set_object_position(&mut self, id: Self::ObjectId, position: Vec3) -> anyhow::Result<()>;

    /// Records the object's current location at `frame`.
    fn insert_location_keyframe(&mut self, id: Self::ObjectId, frame: i32) -> anyhow::Result<()>;

    /// Applies the interpolation to every keyframe on every curve of the object.
    fn set_keyframe_interpolation(
        &mut self,
        id: Self::ObjectId,
        interpolation: Interpolation,
        easing: Easing,
    ) -> anyhow::Result<()>;

    fn set_frame_range(&mut self, start: i32, end: i32);

    /// Moves to `frame` and evaluates all animation at it.
    fn frame_set(&mut self, frame: i32);

    fn set_render_settings(&mut self, settings: RenderSettings);

    fn host_version(&self) -> HostVersion;
}
