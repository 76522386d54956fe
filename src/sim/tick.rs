//! Fixed timestep simulation tick
//!
//! Advances the live entities by one tick and resolves collisions in a fixed
//! order. Rendering happens separately once per display frame.

use glam::Vec2;

use super::state::{GameEvent, GameState, Projectile};
use super::vector::Direction;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Player survived; keep ticking
    Continue,
    /// An enemy reached the player; nothing else was updated
    PlayerHit,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState) -> TickOutcome {
    // Loss check comes first and freezes the world as it was
    if state
        .enemies
        .iter()
        .any(|enemy| state.player.is_hit_by(enemy))
    {
        state.events.push(GameEvent::PlayerHit);
        return TickOutcome::PlayerHit;
    }

    state.time_ticks += 1;

    prune_out_of_bounds(state);
    resolve_projectile_hits(state);

    for projectile in &mut state.projectiles {
        projectile.advance();
    }
    for enemy in &mut state.enemies {
        enemy.advance();
    }

    TickOutcome::Continue
}

/// Drop projectiles and enemies whose centers have left the surface
fn prune_out_of_bounds(state: &mut GameState) {
    let surface = state.surface;

    for i in (0..state.projectiles.len()).rev() {
        if state.projectiles[i].is_out_of_bounds(&surface) {
            state.projectiles.remove(i);
        }
    }

    let before = state.enemies.len();
    state.enemies.retain(|enemy| !enemy.is_out_of_bounds(&surface));
    if state.enemies.len() != before {
        log::debug!("Pruned {} off-screen enemies", before - state.enemies.len());
    }
}

/// Each projectile damages at most one enemy per tick.
///
/// Projectiles and enemies are both scanned newest to oldest, so when a
/// projectile overlaps several enemies the one with the highest index is hit.
fn resolve_projectile_hits(state: &mut GameState) {
    for i in (0..state.projectiles.len()).rev() {
        for j in (0..state.enemies.len()).rev() {
            if !state.projectiles[i].collides_with(&state.enemies[j]) {
                continue;
            }

            state.player.register_hit();
            state.events.push(GameEvent::Scored {
                score: state.player.score,
            });
            state.projectiles.remove(i);
            if state.enemies[j].register_hit() {
                state.enemies.remove(j);
                state.events.push(GameEvent::EnemyDestroyed);
            } else {
                state.events.push(GameEvent::EnemyHit {
                    remaining_radius: state.enemies[j].body.radius,
                });
            }
            break;
        }
    }
}

/// Fire a projectile from the player toward `target` (world coordinates)
///
/// Negative coordinates are clamped to zero. Returns false when the target
/// sits exactly on the player, which leaves no direction to fire in.
pub fn fire(state: &mut GameState, target: Vec2) -> bool {
    let target = target.max(Vec2::ZERO);
    let origin = state.player.body.pos;

    let Some(direction) = Direction::between(origin, target) else {
        log::debug!("Ignoring shot at the player's own position");
        return false;
    };

    state.projectiles.push(Projectile::new(
        origin,
        state.settings.projectile_radius,
        direction,
        state.settings.projectile_speed,
    ));
    state.events.push(GameEvent::ProjectileFired);
    true
}

/// Spawn one enemy aimed at the player
pub fn spawn_enemy(state: &mut GameState) -> bool {
    let player_pos = state.player.body.pos;
    match super::spawn::spawn_random(
        &mut state.rng,
        &state.surface,
        player_pos,
        &state.settings,
    ) {
        Some(enemy) => {
            log::debug!(
                "Enemy spawned at ({:.0}, {:.0}) radius {:.1}",
                enemy.body.pos.x,
                enemy.body.pos.y,
                enemy.body.radius
            );
            state.enemies.push(enemy);
            state.events.push(GameEvent::EnemySpawned);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::entity::{Entity, Surface};
    use crate::sim::state::{Color, Enemy};
    use proptest::prelude::*;

    fn state_with_player_at(x: f32, y: f32) -> GameState {
        let mut state = GameState::new(Surface::new(800.0, 600.0), Settings::default(), 12345);
        state.player.body.pos = Vec2::new(x, y);
        state
    }

    fn still_enemy(x: f32, y: f32, radius: f32) -> Enemy {
        // Heading along +x; enemies under test are far from the player
        Enemy::new(
            Vec2::new(x, y),
            radius,
            Direction::normalize(1.0, 0.0).unwrap(),
            ENEMY_SPEED,
            Color::Green,
        )
    }

    #[test]
    fn test_fire_then_tick_moves_projectile() {
        let mut state = state_with_player_at(100.0, 100.0);
        assert!(fire(&mut state, Vec2::new(200.0, 100.0)));

        let projectile = &state.projectiles[0];
        assert_eq!(projectile.direction.x(), 1.0);
        assert_eq!(projectile.direction.y(), 0.0);
        assert_eq!(projectile.radius(), PROJECTILE_RADIUS);

        assert_eq!(tick(&mut state), TickOutcome::Continue);
        let pos = state.projectiles[0].pos();
        assert!((pos - Vec2::new(107.0, 100.0)).length() < 1e-4);
    }

    #[test]
    fn test_fire_at_player_is_noop() {
        let mut state = state_with_player_at(100.0, 100.0);
        assert!(!fire(&mut state, Vec2::new(100.0, 100.0)));
        assert!(state.projectiles.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_fire_clamps_negative_target() {
        let mut state = state_with_player_at(100.0, 100.0);
        assert!(fire(&mut state, Vec2::new(-50.0, 100.0)));
        // Clamped to (0, 100): straight left
        assert_eq!(state.projectiles[0].direction.x(), -1.0);
    }

    #[test]
    fn test_tick_on_empty_world() {
        let mut state = state_with_player_at(400.0, 300.0);
        assert_eq!(tick(&mut state), TickOutcome::Continue);
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_enemy_touching_player_ends_tick() {
        let mut state = state_with_player_at(400.0, 300.0);
        fire(&mut state, Vec2::new(800.0, 300.0));
        state.enemies.push(still_enemy(425.0, 300.0, 15.0));

        assert_eq!(tick(&mut state), TickOutcome::PlayerHit);
        // Nothing moved
        assert_eq!(state.projectiles[0].pos(), Vec2::new(400.0, 300.0));
        assert_eq!(state.enemies[0].pos(), Vec2::new(425.0, 300.0));
        assert_eq!(state.time_ticks, 0);
        assert!(state.events.contains(&GameEvent::PlayerHit));
    }

    #[test]
    fn test_out_of_bounds_projectiles_pruned() {
        let mut state = state_with_player_at(400.0, 300.0);
        let dir = Direction::normalize(0.0, 1.0).unwrap();
        state
            .projectiles
            .push(Projectile::new(Vec2::new(400.0, 601.0), 5.0, dir, 7.0));
        state
            .projectiles
            .push(Projectile::new(Vec2::new(400.0, 500.0), 5.0, dir, 7.0));

        tick(&mut state);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos(), Vec2::new(400.0, 507.0));
    }

    #[test]
    fn test_out_of_bounds_enemies_pruned() {
        let mut state = state_with_player_at(400.0, 300.0);
        state.enemies.push(still_enemy(-20.0, 100.0, 20.0));
        state.enemies.push(still_enemy(100.0, 100.0, 20.0));

        tick(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos(), Vec2::new(101.5, 100.0));
    }

    #[test]
    fn test_projectile_hit_scores_and_shrinks_enemy() {
        let mut state = state_with_player_at(400.0, 300.0);
        state.enemies.push(still_enemy(100.0, 100.0, 30.0));
        let dir = Direction::normalize(1.0, 0.0).unwrap();
        state
            .projectiles
            .push(Projectile::new(Vec2::new(80.0, 100.0), 5.0, dir, 7.0));

        tick(&mut state);
        assert_eq!(state.score(), 1);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].radius(), 25.0);
        assert!(
            state
                .events
                .contains(&GameEvent::EnemyHit { remaining_radius: 25.0 })
        );
    }

    #[test]
    fn test_projectile_destroys_small_enemy() {
        let mut state = state_with_player_at(400.0, 300.0);
        state.enemies.push(still_enemy(100.0, 100.0, 15.0));
        let dir = Direction::normalize(1.0, 0.0).unwrap();
        state
            .projectiles
            .push(Projectile::new(Vec2::new(95.0, 100.0), 5.0, dir, 7.0));

        tick(&mut state);
        assert_eq!(state.score(), 1);
        assert!(state.enemies.is_empty());
        assert!(state.events.contains(&GameEvent::EnemyDestroyed));
    }

    #[test]
    fn test_overlapping_enemies_highest_index_hit_first() {
        let mut state = state_with_player_at(400.0, 300.0);
        // Both overlap the projectile; index 1 is newer
        state.enemies.push(still_enemy(100.0, 100.0, 30.0));
        state.enemies.push(still_enemy(110.0, 100.0, 40.0));
        let dir = Direction::normalize(1.0, 0.0).unwrap();
        state
            .projectiles
            .push(Projectile::new(Vec2::new(105.0, 100.0), 5.0, dir, 7.0));

        tick(&mut state);
        assert_eq!(state.score(), 1);
        assert_eq!(state.enemies[0].radius(), 30.0);
        assert_eq!(state.enemies[1].radius(), 35.0);
    }

    #[test]
    fn test_each_projectile_hits_once() {
        let mut state = state_with_player_at(400.0, 300.0);
        state.enemies.push(still_enemy(100.0, 100.0, 40.0));
        let dir = Direction::normalize(1.0, 0.0).unwrap();
        for _ in 0..3 {
            state
                .projectiles
                .push(Projectile::new(Vec2::new(100.0, 100.0), 5.0, dir, 7.0));
        }

        tick(&mut state);
        assert_eq!(state.score(), 3);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies[0].radius(), 25.0);

        let scores: Vec<u32> = state
            .drain_events()
            .into_iter()
            .filter_map(|event| match event {
                GameEvent::Scored { score } => Some(score),
                _ => None,
            })
            .collect();
        assert_eq!(scores, vec![1, 2, 3]);
    }

    #[test]
    fn test_spawn_enemy_aims_at_player() {
        let mut state = state_with_player_at(400.0, 300.0);
        assert!(spawn_enemy(&mut state));
        let enemy = &state.enemies[0];
        let expected = (Vec2::new(400.0, 300.0) - enemy.pos()).normalize();
        assert!((enemy.direction.as_vec2() - expected).length() < 1e-5);
        assert_eq!(state.events, vec![GameEvent::EnemySpawned]);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = state_with_player_at(400.0, 300.0);
        let mut b = state_with_player_at(400.0, 300.0);
        for _ in 0..5 {
            spawn_enemy(&mut a);
            spawn_enemy(&mut b);
        }
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos(), eb.pos());
            assert_eq!(ea.radius(), eb.radius());
            assert_eq!(ea.color, eb.color);
        }
    }

    proptest! {
        #[test]
        fn projectiles_travel_in_straight_lines(
            tx in 0.0f32..800.0,
            ty in 0.0f32..600.0,
            ticks in 1usize..40,
        ) {
            let mut state = state_with_player_at(400.0, 300.0);
            prop_assume!((Vec2::new(tx, ty) - Vec2::new(400.0, 300.0)).length() > 1.0);
            fire(&mut state, Vec2::new(tx, ty));
            let dir = state.projectiles[0].direction.as_vec2();

            for n in 1..=ticks {
                tick(&mut state);
                if state.projectiles.is_empty() {
                    break;
                }
                let expected = Vec2::new(400.0, 300.0) + dir * PROJECTILE_SPEED * n as f32;
                prop_assert!((state.projectiles[0].pos() - expected).length() < 1e-2);
            }
        }
    }
}
