use glam::Vec3;

use crate::{Interval, ray_plane_distance, ray_sphere_interval};

/// A ray `origin + t·direction`.
///
/// The direction is not normalised on construction. Callers that rely on the
/// parameter `t` being a distance must pass a unit vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// See [`ray_sphere_interval`].
    pub fn sphere_interval(&self, sphere: &Sphere) -> Option<Interval> {
        ray_sphere_interval(self.origin, self.direction, sphere.center, sphere.radius)
    }

    /// See [`ray_plane_distance`].
    pub fn plane_distance(&self, point: Vec3, normal: Vec3) -> Option<f32> {
        ray_plane_distance(self.origin, self.direction, point, normal)
    }
}

/// A sphere given by centre and radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// A concentric sphere whose radius is larger by `amount`.
    pub fn grown(&self, amount: f32) -> Self {
        Self::new(self.center, self.radius + amount)
    }
}
