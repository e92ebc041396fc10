use id_arena::Id;

use crate::math::AABB;
use crate::scene_graph::animation::Action;
use crate::scene_graph::transform::Transform;

pub type ObjectId = Id<Object3D>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraData {
    pub lens_mm: f32,
}

impl Default for CameraData {
    fn default() -> Self {
        Self { lens_mm: 50.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    Sun,
    Area,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightData {
    pub light_type: LightType,
    pub energy: f32,
    /// Emitter size for area lights, in scene units.
    pub size: f32,
}

impl LightData {
    pub fn new(light_type: LightType, energy: f32) -> Self {
        Self {
            light_type,
            energy,
            size: 1.0,
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    /// Imported geometry, reduced to its local bounding box.
    Mesh { bounds: AABB },
    Empty,
    Camera(CameraData),
    Light(LightData),
}

pub struct Object3D {
    pub name: String,
    pub kind: ObjectKind,
    pub transform: Transform,
    pub animation: Option<Action>,
    pub parent_id: Option<ObjectId>,
    pub child_ids: Vec<ObjectId>,
}

impl Object3D {
    pub fn new(name: impl Into<String>, kind: ObjectKind, transform: Transform) -> Self {
        Self {
            name: name.into(),
            kind,
            transform,
            ..Default::default()
        }
    }
}

impl Default for Object3D {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: ObjectKind::Empty,
            transform: Transform::default(),
            animation: None,
            parent_id: None,
            child_ids: Vec::new(),
        }
    }
}
