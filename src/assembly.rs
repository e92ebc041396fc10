use anyhow::Context;
use glam::Vec3;
use log::info;
use serde::Serialize;

use crate::config::AssemblyConfig;
use crate::context::{ObjectShape, SceneContext};
use crate::scene_graph::easing::{Easing, Interpolation};

pub const FIRST_FRAME: i32 = 1;

/// The objects one part file produced, with the motion they fly in along.
#[derive(Debug, Clone)]
pub struct ComponentGroup<Id> {
    pub name: String,
    pub direction: Vec3,
    pub explode_distance: f32,
    pub objects: Vec<Id>,
}

impl<Id> ComponentGroup<Id> {
    pub fn offset(&self) -> Vec3 {
        self.direction * self.explode_distance
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    pub frames_per_component: i32,
    pub pause_between: i32,
    pub interpolation: Interpolation,
    pub easing: Easing,
}

impl From<&AssemblyConfig> for AnimationSettings {
    fn from(config: &AssemblyConfig) -> Self {
        Self {
            frames_per_component: config.frames_per_component,
            pause_between: config.pause_between,
            interpolation: config.interpolation,
            easing: config.easing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub component: String,
    pub start_frame: i32,
    pub end_frame: i32,
    pub offset: Vec3,
    pub animated_objects: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub segments: Vec<Segment>,
    /// Last frame of the playable range; includes the pause after the last part.
    pub frame_end: i32,
}

/// Keys every mesh of every group flying in from its exploded position, one
/// group after the other.
///
/// A group's meshes share one offset, so parts of a group move rigidly.
/// Non-mesh objects are left alone. A group without meshes still takes up
/// its slot on the timeline.
pub fn create_assembly_animation<C: SceneContext>(
    ctx: &mut C,
    groups: &[ComponentGroup<C::ObjectId>],
    settings: &AnimationSettings,
) -> anyhow::Result<Timeline> {
    let mut current_frame = FIRST_FRAME;
    let mut segments = Vec::with_capacity(groups.len());

    for (index, group) in groups.iter().enumerate() {
        let offset = group.offset();
        let start_frame = current_frame;
        let end_frame = start_frame
            .checked_add(settings.frames_per_component)
            .with_context(|| format!("frame range of {} overflows", group.name))?;
        let mut animated_objects = 0;

        for &id in &group.objects {
            let final_location = match ctx.object_shape(id) {
                Some(ObjectShape::Mesh { position, .. }) => position,
                _ => continue,
            };

            ctx.set_object_position(id, final_location + offset)?;
            ctx.insert_location_keyframe(id, start_frame)?;

            ctx.set_object_position(id, final_location)?;
            ctx.insert_location_keyframe(id, end_frame)?;

            ctx.set_keyframe_interpolation(id, settings.interpolation, settings.easing)?;
            animated_objects += 1;
        }

        info!(
            "Component {} ({}): frame {} -> {}, {} objects",
            index + 1,
            group.name,
            start_frame,
            end_frame,
            animated_objects
        );

        segments.push(Segment {
            component: group.name.clone(),
            start_frame,
            end_frame,
            offset,
            animated_objects,
        });

        current_frame = end_frame
            .checked_add(settings.pause_between)
            .with_context(|| format!("pause after {} overflows", group.name))?;
    }

    ctx.set_frame_range(FIRST_FRAME, current_frame);
    ctx.frame_set(FIRST_FRAME);

    Ok(Timeline {
        segments,
        frame_end: current_frame,
    })
}
