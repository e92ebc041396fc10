use glam::Vec3;
use serde::Serialize;

use crate::scene_graph::easing::{Easing, Interpolation};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Keyframe {
    pub frame: f32,
    pub value: f32,
    pub interpolation: Interpolation,
    pub easing: Easing,
}

/// One animated scalar channel. Keys are sorted by frame and unique per frame.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FCurve {
    keyframes: Vec<Keyframe>,
}

impl FCurve {
    #[allow(dead_code)]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn keyframes_mut(&mut self) -> impl Iterator<Item = &mut Keyframe> {
        self.keyframes.iter_mut()
    }

    /// Inserts a key, replacing the value of an existing key on the same frame.
    pub fn insert(&mut self, frame: f32, value: f32) {
        match self
            .keyframes
            .binary_search_by(|key| key.frame.total_cmp(&frame))
        {
            Ok(index) => self.keyframes[index].value = value,
            Err(index) => self.keyframes.insert(
                index,
                Keyframe {
                    frame,
                    value,
                    interpolation: Interpolation::Bezier,
                    easing: Easing::Auto,
                },
            ),
        }
    }

    pub fn evaluate(&self, frame: f32) -> Option<f32> {
        let first = self.keyframes.first()?;
        let last = self.keyframes.last()?;

        if frame <= first.frame {
            return Some(first.value);
        }
        if frame >= last.frame {
            return Some(last.value);
        }

        let right_index = self.keyframes.partition_point(|key| key.frame <= frame);
        let left = &self.keyframes[right_index - 1];
        let right = &self.keyframes[right_index];

        let t = (frame - left.frame) / (right.frame - left.frame);
        let factor = left.interpolation.factor(left.easing, t);

        Some(left.value + (right.value - left.value) * factor)
    }
}

/// Location animation of one object: an F-curve per axis.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Action {
    pub location: [FCurve; 3],
}

impl Action {
    pub fn insert_location(&mut self, frame: f32, location: Vec3) {
        for (curve, value) in self.location.iter_mut().zip(location.to_array()) {
            curve.insert(frame, value);
        }
    }

    pub fn evaluate_location(&self, frame: f32) -> Option<Vec3> {
        let x = self.location[0].evaluate(frame)?;
        let y = self.location[1].evaluate(frame)?;
        let z = self.location[2].evaluate(frame)?;
        Some(Vec3::new(x, y, z))
    }

    pub fn keyframes_mut(&mut self) -> impl Iterator<Item = &mut Keyframe> {
        self.location.iter_mut().flat_map(FCurve::keyframes_mut)
    }

    #[allow(dead_code)]
    pub fn keyframe_frames(&self) -> Vec<f32> {
        self.location[0]
            .keyframes()
            .iter()
            .map(|key| key.frame)
            .collect()
    }
}
