use glam::{Quat, Vec3};
use nalgebra::Isometry3;

/// `position` is where the model origin is drawn, while the physics body sits at the mass
/// centre. `mass_center_offset` is the vector from the mass centre to the model origin in body
/// space, i.e. the negated local mass centre.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MotionState {
    pub rotation: Quat,
    pub position: Vec3,
    pub mass_center_offset: Vec3,
}

impl MotionState {
    pub fn new(position: Vec3, rotation: Quat, mass_center_offset: Vec3) -> Self {
        Self {
            rotation,
            position,
            mass_center_offset,
        }
    }

    pub fn body_translation(&self) -> Vec3 {
        self.position - self.rotation * self.mass_center_offset
    }

    pub fn body_isometry(&self) -> Isometry3<f32> {
        Isometry3::from((self.body_translation(), self.rotation))
    }

    /// Takes over the simulated body transform.
    pub fn set_from_body(&mut self, isometry: &Isometry3<f32>) {
        self.rotation = Quat::from(isometry.rotation);
        self.position = Vec3::from(isometry.translation.vector) + self.rotation * self.mass_center_offset;
    }
}

#[cfg(test)]
mod tests {
    use super::MotionState;
    use glam::{Quat, Vec3};

    #[test]
    fn body_sits_at_the_mass_center() {
        let center = Vec3::new(0.0, 0.0, 0.5);
        let state = MotionState::new(Vec3::new(10.0, 0.0, 0.0), Quat::IDENTITY, -center);
        assert!(state.body_translation().abs_diff_eq(Vec3::new(10.0, 0.0, 0.5), 1e-6));

        let mut copy = state;
        copy.position = Vec3::ZERO;
        copy.set_from_body(&state.body_isometry());
        assert!(copy.position.abs_diff_eq(state.position, 1e-5));
    }
}
