//! Circular orbit of the two point masses
//!
//! Both bodies sit on a circle of radius `radius`, antipodal to each other,
//! rotating at `2*pi / period`. Positions are a closed-form function of time.

use std::f64::consts::TAU;

use crate::simulation::states::{MassPair, NVec2};

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitModel {
    pub radius: f64, // orbital radius of each mass
    pub period: f64, // seconds per revolution
}

impl OrbitModel {
    pub fn new(radius: f64, period: f64) -> Self {
        Self { radius, period }
    }

    /// Angular velocity in rad/s
    pub fn angular_velocity(&self) -> f64 {
        TAU / self.period
    }

    /// Orbit angle at time `t`
    pub fn angle(&self, t: f64) -> f64 {
        self.angular_velocity() * t
    }

    /// Planar positions of both masses at time `t`.
    /// position1 = radius * (cos theta, sin theta), position2 = -position1
    pub fn positions(&self, t: f64) -> MassPair {
        let theta = self.angle(t);
        let first = NVec2::new(self.radius * theta.cos(), self.radius * theta.sin());
        MassPair {
            first,
            second: -first,
        }
    }
}
