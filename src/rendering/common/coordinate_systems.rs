use glam::{EulerRot, Quat, Vec3};

/// Authoring files store positions as (x, y, z) with the world X axis in the z slot, i.e. the
/// world vector is (z, x, y).
#[inline]
pub fn authoring_to_world(source: Vec3) -> Vec3 {
    Vec3::new(source.z, source.x, source.y)
}

#[inline]
pub fn world_to_authoring(source: Vec3) -> Vec3 {
    Vec3::new(source.y, source.z, source.x)
}

/// The same remapping for the vector part of a rotation.
#[inline]
pub fn authoring_to_world_rot(source: Quat) -> Quat {
    Quat::from_xyzw(source.z, source.x, source.y, source.w)
}

/// Euler angles in degrees, applied as Z * Y * X.
#[inline]
pub fn euler_degrees_to_quat(angles: [f32; 3]) -> Quat {
    Quat::from_euler(
        EulerRot::ZYX,
        angles[2].to_radians(),
        angles[1].to_radians(),
        angles[0].to_radians(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remapping_round_trips() {
        let authored = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(authoring_to_world(authored), Vec3::new(3.0, 1.0, 2.0));
        assert_eq!(world_to_authoring(authoring_to_world(authored)), authored);
    }

    #[test]
    fn euler_angles_are_degrees() {
        let quat = euler_degrees_to_quat([0.0, 0.0, 90.0]);
        let rotated = quat * Vec3::X;
        assert!(rotated.abs_diff_eq(Vec3::Y, 1e-5));
    }
}
