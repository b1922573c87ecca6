//! Collision detection and response for axis-aligned geometry
//!
//! Everything on the field is a rectangle or a point: the ball is tested by
//! its centre against brick rectangles, by a projected position against the
//! walls, and against a thin band just above the paddle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box with its top-left corner at `pos`
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict point-in-rectangle test (points on the edge are outside)
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    /// Penetration depth on each axis, or `None` if the boxes don't overlap
    pub fn overlap(&self, other: &Aabb) -> Option<Vec2> {
        let depth_x = (self.max.x - other.min.x).min(other.max.x - self.min.x);
        let depth_y = (self.max.y - other.min.y).min(other.max.y - self.min.y);
        if depth_x > 0.0 && depth_y > 0.0 {
            Some(Vec2::new(depth_x, depth_y))
        } else {
            None
        }
    }
}

/// Which walls a projected ball position touches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
    pub ceiling: bool,
}

impl WallContact {
    #[inline]
    pub fn any(&self) -> bool {
        self.left || self.right || self.ceiling
    }

    /// Point the velocity away from every touched wall
    pub fn reflect(&self, vel: Vec2) -> Vec2 {
        let mut vel = vel;
        if self.right {
            vel.x = -vel.x.abs();
        } else if self.left {
            vel.x = vel.x.abs();
        }
        if self.ceiling {
            vel.y = vel.y.abs();
        }
        vel
    }
}

/// Test a projected ball centre against the side walls and the ceiling
pub fn wall_contact(next: Vec2, radius: f32, field_width: f32) -> WallContact {
    let right = next.x > field_width - radius;
    WallContact {
        right,
        left: !right && next.x < radius,
        ceiling: next.y < radius,
    }
}

/// Whether the ball is about to land on the paddle
///
/// The vertical sweep from `pos` to `next` must cross the open band spanning
/// the paddle's height, so a fast ball can't step over it in one frame. The
/// ball's current x must be strictly inside the paddle's extent.
pub fn ball_in_paddle_band(pos: Vec2, next: Vec2, paddle: &Aabb) -> bool {
    let (low, high) = (pos.y.min(next.y), pos.y.max(next.y));
    let in_band = low < paddle.max.y && high > paddle.min.y;
    in_band && pos.x > paddle.min.x && pos.x < paddle.max.x
}

/// Clamp each velocity component away from zero, preserving its sign
pub fn enforce_min_speed(vel: Vec2, min_speed: f32) -> Vec2 {
    let clamp_axis = |v: f32| {
        if v.abs() < min_speed {
            // signum of +0.0 is 1.0, so a dead axis restarts moving positive
            min_speed * v.signum()
        } else {
            v
        }
    };
    Vec2::new(clamp_axis(vel.x), clamp_axis(vel.y))
}

/// Resolve a moving brick against another brick
///
/// Returns the moving brick's new velocity when the boxes overlap. The
/// component along the axis of lesser penetration is turned to point away
/// from the other brick.
pub fn brick_overlap_bounce(moving: &Aabb, vel: Vec2, other: &Aabb) -> Option<Vec2> {
    let depth = moving.overlap(other)?;
    let away = moving.center() - other.center();
    let mut vel = vel;
    if depth.x < depth.y {
        vel.x = if away.x < 0.0 { -vel.x.abs() } else { vel.x.abs() };
    } else {
        vel.y = if away.y < 0.0 { -vel.y.abs() } else { vel.y.abs() };
    }
    Some(vel)
}

/// Reflect a moving brick off the region it is allowed to roam
pub fn confine_to_bounds(rect: &Aabb, vel: Vec2, bounds: &Aabb) -> Vec2 {
    let mut vel = vel;
    if rect.min.x < bounds.min.x {
        vel.x = vel.x.abs();
    } else if rect.max.x > bounds.max.x {
        vel.x = -vel.x.abs();
    }
    if rect.min.y < bounds.min.y {
        vel.y = vel.y.abs();
    } else if rect.max.y > bounds.max.y {
        vel.y = -vel.y.abs();
    }
    vel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point_is_strict() {
        let rect = Aabb::new(Vec2::new(95.0, 190.0), Vec2::new(55.0, 20.0));
        assert!(rect.contains_point(Vec2::new(100.0, 195.0)));
        assert!(!rect.contains_point(Vec2::new(95.0, 195.0)));
        assert!(!rect.contains_point(Vec2::new(100.0, 210.0)));
        assert!(!rect.contains_point(Vec2::new(160.0, 195.0)));
    }

    #[test]
    fn test_overlap_depths() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(50.0, 20.0));
        let b = Aabb::new(Vec2::new(45.0, 5.0), Vec2::new(50.0, 20.0));
        let depth = a.overlap(&b).expect("boxes overlap");
        assert_eq!(depth, Vec2::new(5.0, 15.0));

        // Touching edges is not an overlap
        let c = Aabb::new(Vec2::new(50.0, 0.0), Vec2::new(50.0, 20.0));
        assert!(a.overlap(&c).is_none());
    }

    #[test]
    fn test_wall_contact_right_and_ceiling() {
        let contact = wall_contact(Vec2::new(508.0, 5.0), 10.0, 515.0);
        assert!(contact.right && contact.ceiling && !contact.left);

        let vel = contact.reflect(Vec2::new(2.0, -2.0));
        assert_eq!(vel, Vec2::new(-2.0, 2.0));
    }

    #[test]
    fn test_wall_contact_left_keeps_moving_right() {
        let contact = wall_contact(Vec2::new(8.0, 100.0), 10.0, 515.0);
        assert!(contact.left);
        // Already heading away: reflection must not flip it back
        assert_eq!(contact.reflect(Vec2::new(2.0, 1.0)), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_no_wall_contact_mid_field() {
        assert!(!wall_contact(Vec2::new(200.0, 200.0), 10.0, 515.0).any());
    }

    #[test]
    fn test_paddle_band() {
        // Paddle at x 100..175, band y 320..330
        let paddle = Aabb::new(Vec2::new(100.0, 320.0), Vec2::new(75.0, 10.0));
        assert!(ball_in_paddle_band(Vec2::new(120.0, 323.0), Vec2::new(120.0, 325.0), &paddle));
        assert!(!ball_in_paddle_band(Vec2::new(120.0, 317.0), Vec2::new(120.0, 319.0), &paddle));
        assert!(!ball_in_paddle_band(Vec2::new(90.0, 323.0), Vec2::new(90.0, 325.0), &paddle));
        assert!(!ball_in_paddle_band(Vec2::new(175.0, 323.0), Vec2::new(175.0, 325.0), &paddle));
        // Touching the band edge is not a hit
        assert!(!ball_in_paddle_band(Vec2::new(120.0, 318.0), Vec2::new(120.0, 320.0), &paddle));
    }

    #[test]
    fn test_fast_ball_cannot_skip_paddle_band() {
        let paddle = Aabb::new(Vec2::new(200.0, 320.0), Vec2::new(75.0, 10.0));
        // 12 px step from above the band to below it
        assert!(ball_in_paddle_band(Vec2::new(240.0, 318.0), Vec2::new(240.0, 332.0), &paddle));
        // Sweep that ends short of the band
        assert!(!ball_in_paddle_band(Vec2::new(240.0, 306.0), Vec2::new(240.0, 318.0), &paddle));
    }

    #[test]
    fn test_enforce_min_speed() {
        let vel = enforce_min_speed(Vec2::new(0.2, -0.5), 1.0);
        assert_eq!(vel, Vec2::new(1.0, -1.0));

        let vel = enforce_min_speed(Vec2::new(3.0, -2.0), 1.0);
        assert_eq!(vel, Vec2::new(3.0, -2.0));

        let vel = enforce_min_speed(Vec2::new(0.0, 0.0), 1.5);
        assert_eq!(vel, Vec2::new(1.5, 1.5));
    }

    #[test]
    fn test_brick_bounce_uses_shallow_axis() {
        // Moving brick slid 5px into its right-hand neighbour
        let moving = Aabb::new(Vec2::new(0.0, 30.0), Vec2::new(50.0, 20.0));
        let other = Aabb::new(Vec2::new(45.0, 30.0), Vec2::new(50.0, 20.0));
        let vel = brick_overlap_bounce(&moving, Vec2::new(0.6, 0.0), &other).expect("overlap");
        assert_eq!(vel, Vec2::new(-0.6, 0.0));
    }

    #[test]
    fn test_brick_bounce_vertical_overlap() {
        let moving = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(50.0, 20.0));
        let other = Aabb::new(Vec2::new(10.0, 18.0), Vec2::new(50.0, 20.0));
        let vel = brick_overlap_bounce(&moving, Vec2::new(0.5, 0.5), &other).expect("overlap");
        assert_eq!(vel, Vec2::new(0.5, -0.5));
    }

    #[test]
    fn test_brick_bounce_miss() {
        let moving = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(50.0, 20.0));
        let other = Aabb::new(Vec2::new(60.0, 0.0), Vec2::new(50.0, 20.0));
        assert!(brick_overlap_bounce(&moving, Vec2::new(0.6, 0.0), &other).is_none());
    }

    #[test]
    fn test_confine_to_bounds() {
        let bounds = Aabb::new(Vec2::ZERO, Vec2::new(515.0, 300.0));
        let rect = Aabb::new(Vec2::new(470.0, 30.0), Vec2::new(50.0, 20.0));
        assert_eq!(confine_to_bounds(&rect, Vec2::new(0.6, 0.0), &bounds), Vec2::new(-0.6, 0.0));

        let rect = Aabb::new(Vec2::new(-1.0, 30.0), Vec2::new(50.0, 20.0));
        assert_eq!(confine_to_bounds(&rect, Vec2::new(-0.6, 0.0), &bounds), Vec2::new(0.6, 0.0));
    }
}
