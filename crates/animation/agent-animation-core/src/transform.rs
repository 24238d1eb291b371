//! Rigid transform with scale, stored split into TRS so it can be
//! interpolated and sprung component by component.

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Shortest-arc normalized lerp. Used when slerp is ill-conditioned.
#[inline]
fn nlerp_quat(a: &UnitQuaternion<f32>, b: &UnitQuaternion<f32>, t: f32) -> UnitQuaternion<f32> {
    let mut b = b.into_inner();
    if a.coords.dot(&b.coords) < 0.0 {
        b = -b;
    }
    let q: Quaternion<f32> = a.into_inner().lerp(&b, t);
    if q.norm_squared() > 0.0 {
        UnitQuaternion::new_normalize(q)
    } else {
        *a
    }
}

/// Spherical interpolation along the short arc.
#[inline]
pub fn slerp_quat(a: &UnitQuaternion<f32>, b: &UnitQuaternion<f32>, t: f32) -> UnitQuaternion<f32> {
    let b = if a.coords.dot(&b.coords) < 0.0 {
        UnitQuaternion::new_unchecked(-b.into_inner())
    } else {
        *b
    };
    a.try_slerp(&b, t, 1.0e-6)
        .unwrap_or_else(|| nlerp_quat(a, &b, t))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn new(position: Vector3<f32>, rotation: UnitQuaternion<f32>, scale: Vector3<f32>) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::repeat(1.0),
        }
    }

    pub fn from_position(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    pub fn from_position_rotation(position: Vector3<f32>, rotation: UnitQuaternion<f32>) -> Self {
        Self {
            position,
            rotation,
            scale: Vector3::repeat(1.0),
        }
    }

    /// Blend toward `other`: position and scale lerp, rotation slerps along
    /// the short arc. `t` is not clamped.
    pub fn interpolate_with(&self, other: &Transform, t: f32) -> Transform {
        Transform {
            position: self.position.lerp(&other.position, t),
            rotation: slerp_quat(&self.rotation, &other.rotation, t),
            scale: self.scale.lerp(&other.scale, t),
        }
    }

    /// Applies the basis (rotation and scale, no translation) to `v`.
    #[inline]
    pub fn transform_vector(&self, v: &Vector3<f32>) -> Vector3<f32> {
        self.rotation * v.component_mul(&self.scale)
    }

    /// Applies the full transform to a point.
    #[inline]
    pub fn transform_point(&self, p: &Vector3<f32>) -> Vector3<f32> {
        self.transform_vector(p) + self.position
    }
}

impl AbsDiffEq for Transform {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.position.abs_diff_eq(&other.position, epsilon)
            && self.rotation.abs_diff_eq(&other.rotation, epsilon)
            && self.scale.abs_diff_eq(&other.scale, epsilon)
    }
}

impl RelativeEq for Transform {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.position.relative_eq(&other.position, epsilon, max_relative)
            && self.rotation.relative_eq(&other.rotation, epsilon, max_relative)
            && self.scale.relative_eq(&other.scale, epsilon, max_relative)
    }
}
