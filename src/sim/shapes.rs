//! Static vector-outline tables
//!
//! Each shape is a list of paths in local space. The first path is the hull:
//! it becomes the entity's `corners` and is what collides. The remaining paths
//! are decoration for the renderer only.

use glam::Vec2;

/// A multi-path vector shape
pub type Shape = &'static [&'static [Vec2]];

const fn v(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

/// Player ship, nose along +x
pub const PLAYER: Shape = &[&[
    v(5.0, 0.0),
    v(-4.0, -3.0),
    v(-3.0, -2.0),
    v(-3.0, 2.0),
    v(-4.0, 3.0),
    v(5.0, 0.0),
]];

/// Thruster flame drawn behind the player while thrusting
pub const PLAYER_FLAME: &[Vec2] = &[v(-3.0, -1.0), v(-6.0, 0.0), v(-3.0, 1.0)];

/// Saucer: hull, dome, and the rim line
pub const SAUCER: Shape = &[
    &[
        v(-1.0, 0.0),
        v(1.0, 1.0),
        v(5.0, 1.0),
        v(7.0, 0.0),
        v(5.0, -1.0),
        v(1.0, -1.0),
        v(-1.0, 0.0),
    ],
    &[v(2.0, 1.0), v(2.5, 2.0), v(3.5, 2.0), v(4.0, 1.0)],
    &[v(-1.0, 0.0), v(7.0, 0.0)],
];

/// Shot: a tiny square so it has a real bounding box
pub const SHOT: Shape = &[&[v(-1.0, -1.0), v(1.0, -1.0), v(1.0, 1.0), v(-1.0, 1.0)]];

/// Asteroid hull variants (radius ≈ 4, scaled by the size class)
pub const ASTEROIDS: &[Shape] = &[
    &[&[
        v(4.0, 0.0),
        v(3.0, 2.0),
        v(1.0, 2.5),
        v(0.0, 4.0),
        v(-2.5, 3.0),
        v(-4.0, 1.0),
        v(-3.0, -1.0),
        v(-4.0, -2.5),
        v(-1.5, -4.0),
        v(1.5, -3.0),
        v(3.5, -2.5),
        v(4.0, 0.0),
    ]],
    &[&[
        v(3.5, 1.0),
        v(2.0, 3.5),
        v(-1.0, 3.0),
        v(-2.0, 4.0),
        v(-4.0, 2.0),
        v(-3.0, 0.0),
        v(-4.0, -2.0),
        v(-2.0, -4.0),
        v(0.5, -3.0),
        v(2.5, -4.0),
        v(4.0, -1.5),
        v(3.5, 1.0),
    ]],
    &[&[
        v(4.0, 1.5),
        v(1.5, 4.0),
        v(-1.5, 4.0),
        v(-4.0, 1.5),
        v(-4.0, -1.5),
        v(-2.0, -2.0),
        v(-1.5, -4.0),
        v(1.5, -4.0),
        v(4.0, -1.5),
        v(2.5, 0.0),
        v(4.0, 1.5),
    ]],
];

/// Transform a local path into world space
pub fn transform_path(path: &[Vec2], pos: Vec2, rotation: f32, scale: f32) -> Vec<Vec2> {
    path.iter()
        .map(|p| pos + super::geometry::rotate_vector(*p * scale, rotation))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hulls_have_at_least_three_corners() {
        for shape in [PLAYER, SAUCER, SHOT].iter().chain(ASTEROIDS.iter()) {
            assert!(shape[0].len() >= 3);
        }
    }

    #[test]
    fn test_transform_path_scales_and_translates() {
        let world = transform_path(PLAYER[0], Vec2::new(100.0, 50.0), 0.0, 2.0);
        assert_eq!(world[0], Vec2::new(110.0, 50.0));
        assert_eq!(world[1], Vec2::new(92.0, 44.0));
    }
}
