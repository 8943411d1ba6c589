use serde::{Deserialize, Serialize};

/// A horizontal interval `[left, right]` in world units.
///
/// All level constraints (safe zones, canyon spacing, platform overlap,
/// footprint tests) reduce to comparisons between spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub left: f32,
    pub right: f32,
}

impl Span {
    pub fn new(left: f32, width: f32) -> Self {
        Self {
            left,
            right: left + width,
        }
    }

    /// Span of `radius` on each side of `center`.
    pub fn around(center: f32, radius: f32) -> Self {
        Self {
            left: center - radius,
            right: center + radius,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Grow by `margin` on both sides.
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            left: self.left - margin,
            right: self.right + margin,
        }
    }

    /// Open-interval overlap: spans that only touch at an edge do not overlap.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.left < other.right && other.left < self.right
    }

    /// Closed-interval intersection: touching edges count.
    pub fn touches(&self, other: &Span) -> bool {
        self.left <= other.right && other.left <= self.right
    }

    /// Edge-to-edge distance, 0 when the spans overlap or touch.
    pub fn gap_to(&self, other: &Span) -> f32 {
        if self.right <= other.left {
            other.left - self.right
        } else if other.right <= self.left {
            self.left - other.right
        } else {
            0.0
        }
    }

    /// `left < x < right`.
    pub fn contains_strict(&self, x: f32) -> bool {
        self.left < x && x < self.right
    }

    /// `left <= x <= right`.
    pub fn contains(&self, x: f32) -> bool {
        self.left <= x && x <= self.right
    }

    /// Shift so the span lies inside `[min, max]` when it fits, keeping its width.
    pub fn clamped_into(&self, min: f32, max: f32) -> Self {
        let width = self.width();
        let left = self.left.clamp(min, (max - width).max(min));
        Self::new(left, width)
    }
}
