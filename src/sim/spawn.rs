//! Enemy spawning along the surface edges

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::entity::Surface;
use super::state::{Color, ENEMY_PALETTE, Enemy};
use super::vector::Direction;
use crate::settings::Settings;

/// Surface edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Point on this edge, `t` in [0, 1) along its length
    pub fn point_at(&self, surface: &Surface, t: f32) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(t * surface.width, 0.0),
            Edge::Right => Vec2::new(surface.width, t * surface.height),
            Edge::Bottom => Vec2::new(t * surface.width, surface.height),
            Edge::Left => Vec2::new(0.0, t * surface.height),
        }
    }
}

/// Spawn an enemy on a uniformly chosen edge, aimed at the player
pub fn spawn_random<R: Rng + ?Sized>(
    rng: &mut R,
    surface: &Surface,
    player_pos: Vec2,
    settings: &Settings,
) -> Option<Enemy> {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    spawn_on_edge(rng, edge, surface, player_pos, settings)
}

/// Spawn an enemy at a uniform position along `edge`
///
/// The heading is fixed toward the player's current position and never
/// updated afterwards. Returns `None` only if the spawn point coincides with
/// the player, which leaves no direction to travel in.
pub fn spawn_on_edge<R: Rng + ?Sized>(
    rng: &mut R,
    edge: Edge,
    surface: &Surface,
    player_pos: Vec2,
    settings: &Settings,
) -> Option<Enemy> {
    let pos = edge.point_at(surface, rng.random::<f32>());
    let radius = rng.random::<f32>() * settings.enemy_radius_range + settings.enemy_min_radius;
    let color = *ENEMY_PALETTE.choose(rng).unwrap_or(&Color::Yellow);
    let direction = Direction::between(pos, player_pos)?;

    Some(Enemy::new(pos, radius, direction, settings.enemy_speed, color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Entity;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn surface() -> Surface {
        Surface::new(800.0, 600.0)
    }

    #[test]
    fn test_top_edge_enemy_aims_at_player() {
        let mut rng = Pcg32::seed_from_u64(42);
        let settings = Settings::default();
        let player_pos = surface().center();

        for _ in 0..50 {
            let enemy = spawn_on_edge(&mut rng, Edge::Top, &surface(), player_pos, &settings)
                .unwrap();
            assert_eq!(enemy.pos().y, 0.0);
            assert!(enemy.direction.y() >= 0.0);

            let expected = (player_pos - enemy.pos()).normalize();
            assert!((enemy.direction.as_vec2() - expected).length() < 1e-5);
        }
    }

    #[test]
    fn test_spawns_stay_on_edges() {
        let mut rng = Pcg32::seed_from_u64(1);
        let settings = Settings::default();
        let s = surface();

        for _ in 0..200 {
            let enemy = spawn_random(&mut rng, &s, s.center(), &settings).unwrap();
            let p = enemy.pos();
            let on_edge = p.x == 0.0 || p.y == 0.0 || p.x == s.width || p.y == s.height;
            assert!(on_edge, "spawned off-edge at {p:?}");
            assert!(!enemy.is_out_of_bounds(&s));
        }
    }

    #[test]
    fn test_spawn_radius_and_palette() {
        let mut rng = Pcg32::seed_from_u64(9);
        let settings = Settings::default();
        let s = surface();

        for _ in 0..200 {
            let enemy = spawn_random(&mut rng, &s, s.center(), &settings).unwrap();
            assert!(enemy.radius() >= 15.0 && enemy.radius() < 45.0);
            assert!(ENEMY_PALETTE.contains(&enemy.color));
            assert_eq!(enemy.speed, settings.enemy_speed);
        }
    }

    #[test]
    fn test_every_edge_is_used() {
        let mut rng = Pcg32::seed_from_u64(3);
        let settings = Settings::default();
        let s = surface();
        let mut seen = [false; 4];

        for _ in 0..200 {
            let p = spawn_random(&mut rng, &s, s.center(), &settings).unwrap().pos();
            if p.y == 0.0 {
                seen[0] = true;
            }
            if p.x == s.width {
                seen[1] = true;
            }
            if p.y == s.height {
                seen[2] = true;
            }
            if p.x == 0.0 {
                seen[3] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_edge_points() {
        let s = surface();
        assert_eq!(Edge::Top.point_at(&s, 0.5), Vec2::new(400.0, 0.0));
        assert_eq!(Edge::Right.point_at(&s, 0.5), Vec2::new(800.0, 300.0));
        assert_eq!(Edge::Bottom.point_at(&s, 0.25), Vec2::new(200.0, 600.0));
        assert_eq!(Edge::Left.point_at(&s, 0.0), Vec2::new(0.0, 0.0));
    }
}
