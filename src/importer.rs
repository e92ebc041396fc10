//! glTF import into the in-memory scene.
//!
//! Every node becomes one object and keeps its place in the hierarchy. Nodes
//! with a mesh become `Mesh` objects carrying the union of their primitives'
//! POSITION bounds; everything else becomes an `Empty`. glTF is Y-up while
//! the scene is Z-up, so transforms and bounds are converted on the way in
//! unless `Scene::convert_y_up` is off.

use std::f32::consts::FRAC_PI_2;
use std::path::Path;

use glam::{Quat, Vec3};
use gltf::Semantic;
use log::debug;
use thiserror::Error;

use crate::math::AABB;
use crate::scene_graph::object3d::{Object3D, ObjectId, ObjectKind};
use crate::scene_graph::transform::Transform;
use crate::scene_graph::Scene;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),

    #[error("no scene in {0}")]
    NoScene(String),

    #[error("mesh '{0}' has a primitive without POSITION bounds")]
    MissingBounds(String),

    #[error("invalid POSITION bounds: {0}")]
    InvalidBounds(#[from] serde_json::Error),
}

pub type ImportResult<T> = Result<T, ImportError>;

/// Imports the default (or first) scene of a `.glb`/`.gltf` file and links
/// the new objects into a collection named after the file stem.
///
/// Returns the created objects in depth-first order, parents before children.
pub fn import_gltf(scene: &mut Scene, path: &Path) -> ImportResult<Vec<ObjectId>> {
    // Bounds come from accessor min/max, so buffers and images stay unloaded.
    let document = gltf::Gltf::open(path)?.document;
    let file_stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Import".to_string());

    let gltf_scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| ImportError::NoScene(path.display().to_string()))?;

    let mut created = Vec::new();
    for node in gltf_scene.nodes() {
        spawn_gltf_node(scene, &file_stem, &node, None, &mut created)?;
    }

    scene.link_to_collection(&file_stem, &created);
    debug!(
        "Imported {} nodes from scene {:?} of {}",
        created.len(),
        gltf_scene.name(),
        path.display()
    );

    Ok(created)
}

fn spawn_gltf_node(
    scene: &mut Scene,
    file_stem: &str,
    node: &gltf::Node,
    parent: Option<ObjectId>,
    created: &mut Vec<ObjectId>,
) -> ImportResult<ObjectId> {
    let name = node
        .name()
        .map(String::from)
        .unwrap_or_else(|| format!("{}.{:03}", file_stem, node.index()));

    let (translation, rotation, scale) = node.transform().decomposed();
    let mut translation = Vec3::from(translation);
    let mut rotation = Quat::from_array(rotation);
    let mut scale = Vec3::from(scale);

    let mut kind = match node.mesh() {
        Some(mesh) => ObjectKind::Mesh {
            bounds: mesh_bounds(&mesh)?,
        },
        None => ObjectKind::Empty,
    };

    if scene.convert_y_up {
        translation = y_up_to_z_up(translation);
        rotation = y_up_to_z_up_rotation(rotation);
        scale = Vec3::new(scale.x, scale.z, scale.y);
        if let ObjectKind::Mesh { bounds } = &mut kind {
            *bounds = AABB::new(y_up_to_z_up(bounds.min), y_up_to_z_up(bounds.max));
        }
    }

    let mut object = Object3D::new(name, kind, Transform::default());
    object.transform.set_transform(translation, rotation, scale);

    let object_id = scene.add_object(object);
    created.push(object_id);

    if parent.is_some() {
        scene.set_object_parent(object_id, parent);
    }

    for child in node.children() {
        spawn_gltf_node(scene, file_stem, &child, Some(object_id), created)?;
    }

    Ok(object_id)
}

fn mesh_bounds(mesh: &gltf::Mesh) -> ImportResult<AABB> {
    let mesh_name = || mesh.name().unwrap_or("Unnamed").to_string();
    let mut bounds = AABB::empty();

    for primitive in mesh.primitives() {
        let accessor = primitive
            .get(&Semantic::Positions)
            .ok_or_else(|| ImportError::MissingBounds(mesh_name()))?;

        let (Some(min), Some(max)) = (accessor.min(), accessor.max()) else {
            return Err(ImportError::MissingBounds(mesh_name()));
        };

        let min: [f32; 3] = serde_json::from_value(min)?;
        let max: [f32; 3] = serde_json::from_value(max)?;
        bounds = bounds.union(&AABB::new(min.into(), max.into()));
    }

    if bounds.is_empty() {
        return Err(ImportError::MissingBounds(mesh_name()));
    }

    Ok(bounds)
}

fn y_up_to_z_up(v: Vec3) -> Vec3 {
    Vec3::new(v.x, -v.z, v.y)
}

fn y_up_to_z_up_rotation(rotation: Quat) -> Quat {
    let axis_conversion = Quat::from_rotation_x(FRAC_PI_2);
    axis_conversion * rotation * axis_conversion.inverse()
}
