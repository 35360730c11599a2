//! Quadratic Bezier flight paths for shots
//!
//! A shot flies along B(t) = (1-t)²·start + 2(1-t)t·control + t²·target,
//! with t the normalized flight progress. Pixel space, y pointing down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ARC_HEIGHT_RATIO, MIN_TRAJECTORY_DISTANCE};

/// A quadratic Bezier curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadBezier {
    pub start: Vec2,
    pub control: Vec2,
    pub target: Vec2,
}

impl QuadBezier {
    pub fn new(start: Vec2, control: Vec2, target: Vec2) -> Self {
        Self {
            start,
            control,
            target,
        }
    }

    /// Lob from `start` to `target`: control sits at the midpoint x, raised
    /// above the higher endpoint by half the distance.
    ///
    /// Returns `None` when the endpoints coincide.
    pub fn lob(start: Vec2, target: Vec2) -> Option<Self> {
        let distance = start.distance(target);
        if !(distance >= MIN_TRAJECTORY_DISTANCE) {
            return None;
        }
        let control = Vec2::new(
            (start.x + target.x) * 0.5,
            start.y.min(target.y) - distance * ARC_HEIGHT_RATIO,
        );
        Some(Self::new(start, control, target))
    }

    /// Point at progress `t`
    #[inline]
    pub fn point(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        self.start * (u * u) + self.control * (2.0 * u * t) + self.target * (t * t)
    }

    /// Derivative dB/dt at progress `t` (pixels per unit progress)
    #[inline]
    pub fn derivative(&self, t: f32) -> Vec2 {
        (self.control - self.start) * (2.0 * (1.0 - t)) + (self.target - self.control) * (2.0 * t)
    }

    /// Straight-line distance between the endpoints
    pub fn chord(&self) -> f32 {
        self.start.distance(self.target)
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.control.is_finite() && self.target.is_finite()
    }

    /// Sample points along the curve (for trajectory previews)
    pub fn sample(&self, num_points: usize) -> Vec<Vec2> {
        (0..num_points)
            .map(|i| {
                let t = i as f32 / (num_points - 1).max(1) as f32;
                self.point(t)
            })
            .collect()
    }
}
