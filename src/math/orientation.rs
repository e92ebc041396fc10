use glam::{Mat3, Quat, Vec3};

/// Rotation that points the local −Z axis along `direction` while keeping
/// local +Y as close to world +Z as possible.
///
/// When `direction` is parallel to world Z, world +Y is used as the up
/// reference instead.
pub fn track_to_neg_z_up_y(direction: Vec3) -> Quat {
    let Some(forward) = direction.try_normalize() else {
        return Quat::IDENTITY;
    };

    let z_axis = -forward;
    let up = if z_axis.cross(Vec3::Z).length_squared() < 1e-10 {
        Vec3::Y
    } else {
        Vec3::Z
    };

    let x_axis = up.cross(z_axis).normalize();
    let y_axis = z_axis.cross(x_axis);

    Quat::from_mat3(&Mat3::from_cols(x_axis, y_axis, z_axis))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_looks_along_direction() {
        let direction = Vec3::new(-1.5, 1.5, -0.8);
        let rotation = track_to_neg_z_up_y(direction);

        assert_vec_near(rotation * Vec3::NEG_Z, direction.normalize());
    }

    #[test]
    fn test_local_y_leans_towards_world_up() {
        let rotation = track_to_neg_z_up_y(Vec3::Y);

        assert_vec_near(rotation * Vec3::NEG_Z, Vec3::Y);
        assert_vec_near(rotation * Vec3::Y, Vec3::Z);
    }

    #[test]
    fn test_straight_down_uses_world_y_as_up() {
        let rotation = track_to_neg_z_up_y(Vec3::NEG_Z);

        assert_vec_near(rotation * Vec3::NEG_Z, Vec3::NEG_Z);
        assert_vec_near(rotation * Vec3::Y, Vec3::Y);
    }

    #[test]
    fn test_zero_direction_is_identity() {
        assert_eq!(track_to_neg_z_up_y(Vec3::ZERO), Quat::IDENTITY);
    }
}
