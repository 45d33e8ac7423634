//! Vector helpers that glam does not name directly.

use crate::Vec3;

/// Component access and reductions used by the shading code.
pub trait Vec3Ext {
    /// Component `i` (0 = x, 1 = y, 2 = z).
    ///
    /// Panics if `i > 2`.
    fn component(self, i: usize) -> f32;

    /// Largest of the three components.
    fn max_component(self) -> f32;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn component(self, i: usize) -> f32 {
        self[i]
    }

    #[inline]
    fn max_component(self) -> f32 {
        self.max_element()
    }
}

/// Reflect `incident` about the normal `n`.
///
/// `I - N * (I·N) * 2`. `n` must be unit length.
#[inline]
pub fn reflect(incident: Vec3, n: Vec3) -> Vec3 {
    incident - n * incident.dot(n) * 2.0
}
