//! Axis-aligned box geometry
//!
//! Every entity occupies a box whose top-left corner is its position.
//! Overlap is the only geometric test the simulation performs.

use glam::Vec2;

use crate::error::ConfigError;

/// A validated, strictly positive entity size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    width: f32,
    height: f32,
}

impl Hitbox {
    /// Fails for zero, negative or non-finite dimensions
    pub fn new(what: &'static str, width: f32, height: f32) -> Result<Self, ConfigError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Ok(Self { width, height })
        } else {
            Err(ConfigError::InvalidSize {
                what,
                width,
                height,
            })
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Box occupied by an entity of this size at `pos`
    #[inline]
    pub fn at(&self, pos: Vec2) -> Aabb {
        Aabb {
            min: pos,
            max: pos + self.as_vec2(),
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// True when the interiors overlap. Boxes that only share an edge do not.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Hitbox {
        Hitbox::new("test", 10.0, 10.0).unwrap()
    }

    #[test]
    fn test_overlap() {
        let a = unit().at(Vec2::new(0.0, 0.0));
        let b = unit().at(Vec2::new(5.0, 5.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = unit().at(Vec2::new(0.0, 0.0));
        let right = unit().at(Vec2::new(10.0, 0.0));
        let below = unit().at(Vec2::new(0.0, 10.0));
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = unit().at(Vec2::new(0.0, 0.0));
        let b = unit().at(Vec2::new(5.0, 40.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_center() {
        let b = Hitbox::new("test", 40.0, 20.0).unwrap().at(Vec2::new(10.0, 10.0));
        assert_eq!(b.center(), Vec2::new(30.0, 20.0));
    }

    #[test]
    fn test_rejects_degenerate_sizes() {
        assert!(Hitbox::new("test", 0.0, 5.0).is_err());
        assert!(Hitbox::new("test", 5.0, -1.0).is_err());
        assert!(Hitbox::new("test", f32::NAN, 5.0).is_err());
        assert!(Hitbox::new("test", f32::INFINITY, 5.0).is_err());
    }
}
