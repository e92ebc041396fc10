pub mod animation;
pub mod easing;
pub mod object3d;
pub mod scene;
pub mod transform;

pub use scene::Scene;
