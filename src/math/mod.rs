pub mod bounds;
pub mod orientation;

pub use bounds::AABB;
pub use orientation::track_to_neg_z_up_y;
