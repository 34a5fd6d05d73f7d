//! Built-in map: a winding enemy path drawn as rectangular obstacles.

use data_defence_core::{Hitbox, PathObstacle};
use glam::Vec2;

/// Path segments as (top-left, bottom-right) corners, in walking order.
const SEGMENTS: [(Vec2, Vec2); 5] = [
    (Vec2::new(0.0, 88.0), Vec2::new(1032.0, 152.0)),
    (Vec2::new(968.0, 152.0), Vec2::new(1032.0, 432.0)),
    (Vec2::new(168.0, 368.0), Vec2::new(1032.0, 432.0)),
    (Vec2::new(168.0, 432.0), Vec2::new(232.0, 672.0)),
    (Vec2::new(168.0, 608.0), Vec2::new(1280.0, 672.0)),
];

/// Obstacles tracing the default enemy path from the left edge to the right edge of the map.
pub(crate) fn default_path() -> Vec<PathObstacle> {
    SEGMENTS
        .iter()
        .map(|&(min, max)| {
            let size = max - min;
            PathObstacle::new(
                (min + max) * 0.5,
                Hitbox::Rect {
                    width: size.x,
                    height: size.y,
                },
            )
        })
        .collect()
}
