//! Per-frame model transforms for the spinning quads.

use glam::{Mat4, Vec2, Vec3};

/// Uniform scale applied to every quad.
pub const QUAD_SCALE: f32 = 0.5;

/// Direction a quad spins in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spin {
    CounterClockwise,
    Clockwise,
}

impl Spin {
    /// Sign applied to elapsed time to get the rotation angle.
    pub fn sign(self) -> f32 {
        match self {
            Spin::CounterClockwise => 1.0,
            Spin::Clockwise => -1.0,
        }
    }
}

/// Builds `identity * translate(offset) * rotate_z(angle) * scale(QUAD_SCALE)`.
///
/// Vertices are scaled first, then rotated about the quad's own center, then moved to
/// `offset`.
pub fn quad_transform(offset: Vec2, angle: f32) -> Mat4 {
    Mat4::IDENTITY
        * Mat4::from_translation(offset.extend(0.0))
        * Mat4::from_rotation_z(angle)
        * Mat4::from_scale(Vec3::splat(QUAD_SCALE))
}

/// One drawn quad: which program and texture unit it uses, where it sits and how it turns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadInstance {
    pub program_slot: usize,
    pub texture_unit: u32,
    pub offset: Vec2,
    pub spin: Spin,
}

impl QuadInstance {
    /// Rotation angle in radians after `elapsed` seconds.
    pub fn angle_at(&self, elapsed: f32) -> f32 {
        self.spin.sign() * elapsed
    }

    /// Model transform after `elapsed` seconds.
    pub fn transform_at(&self, elapsed: f32) -> Mat4 {
        quad_transform(self.offset, self.angle_at(elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-6;

    fn left() -> QuadInstance {
        QuadInstance {
            program_slot: 0,
            texture_unit: 0,
            offset: Vec2::new(-0.5, 0.0),
            spin: Spin::CounterClockwise,
        }
    }

    fn right() -> QuadInstance {
        QuadInstance {
            program_slot: 1,
            texture_unit: 1,
            offset: Vec2::new(0.5, 0.0),
            spin: Spin::Clockwise,
        }
    }

    #[test]
    fn at_time_zero_only_offset_and_scale_apply() {
        let m = quad_transform(Vec2::new(-0.5, 0.0), 0.0);
        let expected = Mat4::from_scale_rotation_translation(
            Vec3::splat(0.5),
            glam::Quat::IDENTITY,
            Vec3::new(-0.5, 0.0, 0.0),
        );
        assert!(m.abs_diff_eq(expected, EPSILON));
    }

    #[test]
    fn origin_lands_on_offset() {
        for t in [0.0, 0.3, 1.0, 12.5] {
            assert!(
                left()
                    .transform_at(t)
                    .transform_point3(Vec3::ZERO)
                    .abs_diff_eq(Vec3::new(-0.5, 0.0, 0.0), EPSILON)
            );
            assert!(
                right()
                    .transform_at(t)
                    .transform_point3(Vec3::ZERO)
                    .abs_diff_eq(Vec3::new(0.5, 0.0, 0.0), EPSILON)
            );
        }
    }

    #[test]
    fn scale_happens_before_rotation_and_translation() {
        // Quarter turn: +x of the quad points up, at half length.
        let p = quad_transform(Vec2::new(-0.5, 0.0), FRAC_PI_2).transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(-0.5, 0.5, 0.0), EPSILON));

        let p = quad_transform(Vec2::new(0.5, 0.0), -FRAC_PI_2).transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(0.5, -0.5, 0.0), EPSILON));
    }

    #[test]
    fn quads_spin_in_opposite_directions() {
        for t in [0.0, 0.25, 2.0, 100.0] {
            assert_eq!(left().angle_at(t), t);
            assert_eq!(right().angle_at(t), -t);
        }
    }

    #[test]
    fn transforms_mirror_across_the_y_axis() {
        let mirror = Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0));
        for t in [0.0, 0.7, 3.0] {
            let a = left().transform_at(t);
            let b = right().transform_at(t);
            assert!((mirror * a * mirror).abs_diff_eq(b, EPSILON));
        }
    }

    #[test]
    fn depth_is_scaled_too() {
        let p = left().transform_at(1.0).transform_point3(Vec3::Z);
        assert!((p.z - QUAD_SCALE).abs() < EPSILON);
    }
}
