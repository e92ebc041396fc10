use std::path::Path;

use anyhow::{anyhow, Context};
use glam::{Mat4, Quat, Vec3};
use id_arena::Arena;
use log::debug;

use crate::context::{ObjectShape, SceneContext};
use crate::importer;
use crate::render_settings::{HostVersion, RenderSettings};
use crate::scene_graph::animation::Action;
use crate::scene_graph::easing::{Easing, Interpolation};
use crate::scene_graph::object3d::{CameraData, LightData, Object3D, ObjectId, ObjectKind};
use crate::scene_graph::transform::Transform;

pub const DEFAULT_COLLECTION: &str = "Collection";

#[derive(Debug, Clone)]
pub struct Collection {
    pub name: String,
    pub object_ids: Vec<ObjectId>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            object_ids: Vec::new(),
        }
    }
}

/// In-memory 3D host: objects, collections, playback range and render settings.
pub struct Scene {
    pub objects: Arena<Object3D>,
    pub collections: Vec<Collection>,
    pub active_camera: Option<ObjectId>,
    pub frame_start: i32,
    pub frame_end: i32,
    pub frame_current: i32,
    pub convert_y_up: bool,
    render: RenderSettings,
    host_version: HostVersion,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_host_version(HostVersion(4, 2, 0))
    }

    pub fn with_host_version(host_version: HostVersion) -> Self {
        Self {
            objects: Arena::new(),
            collections: vec![Collection::new(DEFAULT_COLLECTION)],
            active_camera: None,
            frame_start: 1,
            frame_end: 250,
            frame_current: 1,
            convert_y_up: true,
            render: RenderSettings::default(),
            host_version,
        }
    }

    pub fn add_object(&mut self, object: Object3D) -> ObjectId {
        self.objects.alloc(object)
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    #[allow(dead_code)]
    pub fn get_object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn object_mut_or_err(&mut self, id: ObjectId) -> anyhow::Result<&mut Object3D> {
        self.objects
            .get_mut(id)
            .ok_or_else(|| anyhow!("Unknown object {:?}", id))
    }

    /// Sets the parent of an object and updates child relationships
    pub fn set_object_parent(&mut self, child_id: ObjectId, new_parent_id: Option<ObjectId>) {
        if let Some(child) = self.objects.get(child_id) {
            if let Some(old_parent_id) = child.parent_id {
                if let Some(old_parent) = self.objects.get_mut(old_parent_id) {
                    old_parent.child_ids.retain(|&id| id != child_id);
                }
            }
        }

        if let Some(child) = self.objects.get_mut(child_id) {
            child.parent_id = new_parent_id;

            if let Some(new_parent_id) = new_parent_id {
                if let Some(new_parent) = self.objects.get_mut(new_parent_id) {
                    new_parent.child_ids.push(child_id);
                }
            }
        }
    }

    /// Composes local matrices from the root down to `object_id`.
    pub fn world_matrix(&self, object_id: ObjectId) -> Option<Mat4> {
        let object = self.objects.get(object_id)?;
        let local = object.transform.local_matrix();

        match object.parent_id {
            Some(parent_id) => Some(self.world_matrix(parent_id)? * local),
            None => Some(local),
        }
    }

    #[allow(dead_code)]
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Links objects into a collection, creating it on first use.
    pub fn link_to_collection(&mut self, name: &str, object_ids: &[ObjectId]) {
        let index = match self.collections.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.collections.push(Collection::new(name));
                self.collections.len() - 1
            }
        };

        self.collections[index]
            .object_ids
            .extend_from_slice(object_ids);
    }

    pub fn render_settings(&self) -> &RenderSettings {
        &self.render
    }

    fn add_object_to_default_collection(&mut self, object: Object3D) -> ObjectId {
        let object_id = self.add_object(object);
        self.link_to_collection(DEFAULT_COLLECTION, &[object_id]);
        object_id
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneContext for Scene {
    type ObjectId = ObjectId;

    fn clear(&mut self) {
        // A fresh arena also invalidates every id handed out so far.
        self.objects = Arena::new();
        self.collections = vec![Collection::new(DEFAULT_COLLECTION)];
        self.active_camera = None;
    }

    fn import(&mut self, path: &Path) -> anyhow::Result<Vec<ObjectId>> {
        let object_ids = importer::import_gltf(self, path)
            .with_context(|| format!("Failed to import {}", path.display()))?;
        debug!("{} created {} objects", path.display(), object_ids.len());
        Ok(object_ids)
    }

    fn object_shape(&self, id: ObjectId) -> Option<ObjectShape> {
        let object = self.objects.get(id)?;
        let position = object.transform.translation();

        match &object.kind {
            ObjectKind::Mesh { bounds } => Some(ObjectShape::Mesh {
                bound_box: bounds.corners(),
                matrix_world: self.world_matrix(id)?,
                position,
            }),
            _ => Some(ObjectShape::Other { position }),
        }
    }

    fn object_name(&self, id: ObjectId) -> Option<&str> {
        self.objects.get(id).map(|object| object.name.as_str())
    }

    fn create_camera(&mut self, name: &str, position: Vec3, rotation: Quat) -> ObjectId {
        self.add_object_to_default_collection(Object3D::new(
            name,
            ObjectKind::Camera(CameraData::default()),
            Transform::from_translation_rotation(position, rotation),
        ))
    }

    fn set_active_camera(&mut self, id: ObjectId) -> anyhow::Result<()> {
        match self.objects.get(id).map(|object| &object.kind) {
            Some(ObjectKind::Camera(_)) => {
                self.active_camera = Some(id);
                Ok(())
            }
            Some(_) => Err(anyhow!("Object {:?} is not a camera", id)),
            None => Err(anyhow!("Unknown object {:?}", id)),
        }
    }

    fn create_light(&mut self, name: &str, light: LightData, position: Vec3) -> ObjectId {
        self.add_object_to_default_collection(Object3D::new(
            name,
            ObjectKind::Light(light),
            Transform::from_translation(position),
        ))
    }

    fn set_object_position(&mut self, id: ObjectId, position: Vec3) -> anyhow::Result<()> {
        self.object_mut_or_err(id)?
            .transform
            .set_translation(position);
        Ok(())
    }

    fn insert_location_keyframe(&mut self, id: ObjectId, frame: i32) -> anyhow::Result<()> {
        let object = self.object_mut_or_err(id)?;
        let location = object.transform.translation();
        object
            .animation
            .get_or_insert_with(Action::default)
            .insert_location(frame as f32, location);
        Ok(())
    }

    fn set_keyframe_interpolation(
        &mut self,
        id: ObjectId,
        interpolation: Interpolation,
        easing: Easing,
    ) -> anyhow::Result<()> {
        let object = self.object_mut_or_err(id)?;
        if let Some(action) = object.animation.as_mut() {
            for keyframe in action.keyframes_mut() {
                keyframe.interpolation = interpolation;
                keyframe.easing = easing;
            }
        }
        Ok(())
    }

    fn set_frame_range(&mut self, start: i32, end: i32) {
        self.frame_start = start;
        self.frame_end = end;
    }

    fn frame_set(&mut self, frame: i32) {
        self.frame_current = frame;

        for (_, object) in self.objects.iter_mut() {
            let location = object
                .animation
                .as_ref()
                .and_then(|action| action.evaluate_location(frame as f32));

            if let Some(location) = location {
                object.transform.set_translation(location);
            }
        }
    }

    fn set_render_settings(&mut self, settings: RenderSettings) {
        self.render = settings;
    }

    fn host_version(&self) -> HostVersion {
        self.host_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::AABB;
    use crate::scene_graph::object3d::LightType;

    fn unit_mesh(name: &str, translation: Vec3) -> Object3D {
        Object3D::new(
            name,
            ObjectKind::Mesh {
                bounds: AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0)),
            },
            Transform::from_translation(translation),
        )
    }

    #[test]
    fn test_clear_drops_objects_and_extra_collections() {
        let mut scene = Scene::new();
        let id = scene.add_object(unit_mesh("Part", Vec3::ZERO));
        scene.link_to_collection("70000001", &[id]);
        let camera = scene.create_camera("Cam", Vec3::ONE, Quat::IDENTITY);
        scene.set_active_camera(camera).unwrap();

        scene.clear();

        assert_eq!(scene.object_count(), 0);
        assert!(scene.get_object(id).is_none());
        assert_eq!(scene.collections.len(), 1);
        assert_eq!(scene.collections[0].name, DEFAULT_COLLECTION);
        assert!(scene.active_camera.is_none());
    }

    #[test]
    fn test_world_matrix_composes_parents() {
        let mut scene = Scene::new();
        let parent = scene.add_object(Object3D::new(
            "Root",
            ObjectKind::Empty,
            Transform::from_translation(Vec3::new(10.0, 0.0, 0.0)),
        ));
        let child = scene.add_object(unit_mesh("Part", Vec3::new(0.0, 5.0, 0.0)));
        scene.set_object_parent(child, Some(parent));

        let world = scene.world_matrix(child).unwrap();
        assert_eq!(world.transform_point3(Vec3::ZERO), Vec3::new(10.0, 5.0, 0.0));
        assert_eq!(scene.get_object(parent).unwrap().child_ids, vec![child]);
    }

    #[test]
    fn test_object_shape_distinguishes_meshes() {
        let mut scene = Scene::new();
        let mesh = scene.add_object(unit_mesh("Part", Vec3::new(1.0, 2.0, 3.0)));
        let light = scene.create_light(
            "Sun",
            LightData::new(LightType::Sun, 3.0),
            Vec3::new(0.0, 0.0, 9.0),
        );

        match scene.object_shape(mesh) {
            Some(ObjectShape::Mesh {
                bound_box,
                position,
                ..
            }) => {
                assert_eq!(bound_box[0], Vec3::splat(-1.0));
                assert_eq!(position, Vec3::new(1.0, 2.0, 3.0));
            }
            other => panic!("expected a mesh, got {other:?}"),
        }
        assert_eq!(
            scene.object_shape(light),
            Some(ObjectShape::Other {
                position: Vec3::new(0.0, 0.0, 9.0)
            })
        );
    }

    #[test]
    fn test_only_cameras_become_active() {
        let mut scene = Scene::new();
        let mesh = scene.add_object(unit_mesh("Part", Vec3::ZERO));
        assert!(scene.set_active_camera(mesh).is_err());

        let camera = scene.create_camera("Cam", Vec3::ZERO, Quat::IDENTITY);
        scene.set_active_camera(camera).unwrap();
        assert_eq!(scene.active_camera, Some(camera));
    }

    #[test]
    fn test_frame_set_evaluates_location_curves() {
        let mut scene = Scene::new();
        let id = scene.add_object(unit_mesh("Part", Vec3::ZERO));

        scene.set_object_position(id, Vec3::new(0.0, 0.0, 100.0)).unwrap();
        scene.insert_location_keyframe(id, 1).unwrap();
        scene.set_object_position(id, Vec3::ZERO).unwrap();
        scene.insert_location_keyframe(id, 11).unwrap();
        scene
            .set_keyframe_interpolation(id, Interpolation::Linear, Easing::Auto)
            .unwrap();

        scene.frame_set(1);
        assert_eq!(scene.object_shape(id).unwrap().position(), Vec3::new(0.0, 0.0, 100.0));

        scene.frame_set(6);
        assert_eq!(scene.object_shape(id).unwrap().position(), Vec3::new(0.0, 0.0, 50.0));
        assert_eq!(scene.frame_current, 6);
    }

    #[test]
    fn test_keyframing_unknown_object_fails() {
        let mut scene = Scene::new();
        let id = scene.add_object(unit_mesh("Part", Vec3::ZERO));
        scene.clear();

        assert!(scene.insert_location_keyframe(id, 1).is_err());
        assert!(scene.set_object_position(id, Vec3::ONE).is_err());
    }
}
