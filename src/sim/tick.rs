//! Per-frame simulation tick
//!
//! Core game loop: spawns, entity motion, collision resolution and the
//! game-over transition. Movement is per frame; timers use the frame delta.

use glam::Vec2;
use rand::Rng;

use super::collision::{circles_overlap, rects_overlap};
use super::entities::{Collectible, Drifter};
use super::input::InputSnapshot;
use super::state::{FrameTime, GamePhase, GameSession, LifeAnimation};

/// What a pointer click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Restart button hit during game over
    Restarted,
    /// A shot was queued for the next tick
    Fired,
    Ignored,
}

/// Advance the session by one frame
pub fn tick(session: &mut GameSession, input: &mut InputSnapshot, frame: FrameTime) {
    let now = frame.now_ms;
    if session.start_time.is_none() {
        session.start_time = Some(now);
    }
    session.current_time = now;

    let life_ms = session.config.hud.life_animation_ms as f64;
    session
        .life_animations
        .retain(|anim| now - anim.start_time < life_ms);

    if session.phase == GamePhase::GameOver {
        session.game_over.update(now, &session.config.game_over);
        let button = &mut session.restart_button;
        button.rect.y = session.game_over.button_y;
        button.hovered = button.rect.contains(input.pointer());
        // Shots requested on the final frame are dropped
        input.consume_fire();
        return;
    }

    let dt = frame.delta_ms;
    let field = session.field();
    let field_height = field.height;

    spawn_collectible(session, dt);
    for collectible in &mut session.collectibles {
        collectible.update(dt, field_height);
    }

    for projectile in &mut session.projectiles {
        projectile.update(&field);
    }
    if input.consume_fire() {
        let origin = session.muzzle();
        let projectile = session
            .pool
            .acquire(origin, input.pointer(), &session.config.projectile);
        session.projectiles.push(projectile);
    }

    spawn_drifter(session);
    for drifter in &mut session.drifters {
        drifter.update(field_height);
    }

    resolve_collisions(session, now);

    if session.phase == GamePhase::Playing {
        session.player.update(input, dt);
        let game_speed = session.config.playfield.game_speed;
        for layer in &mut session.layers {
            layer.update(game_speed);
        }
    }

    sweep(session);
}

/// Count toward the next heart; spawn when due and below the cap
fn spawn_collectible(session: &mut GameSession, dt: f32) {
    let cfg = &session.config.collectible;
    session.time_to_next_collectible += dt;
    if session.time_to_next_collectible > cfg.spawn_interval_ms
        && session.collectibles.len() < cfg.max_active
    {
        let collectible = Collectible::spawn(&mut session.rng, cfg, &session.config.playfield);
        log::debug!("Collectible spawned at y={:.0}", collectible.pos.y);
        session.collectibles.push(collectible);
        session.time_to_next_collectible = 0.0;
    }
}

/// Spawn a drifter when the cooldown is over, a heart is on screen and the
/// cap allows it; otherwise count the cooldown down one frame
fn spawn_drifter(session: &mut GameSession) {
    let cfg = &session.config.drifter;
    if session.drifter_cooldown == 0
        && !session.collectibles.is_empty()
        && session.drifters.len() < cfg.max_active
    {
        let drifter = Drifter::spawn(&mut session.rng, cfg, &session.config.playfield);
        log::debug!("Drifter spawned (variant {})", drifter.variant);
        session.drifters.push(drifter);
        session.drifter_cooldown = session
            .rng
            .random_range(cfg.cooldown_min..=cfg.cooldown_max);
    } else if session.drifter_cooldown > 0 {
        session.drifter_cooldown -= 1;
    }
}

/// Projectile/heart hits, then player/heart and player/drifter hits
///
/// A hazard is removed only if it actually damaged the player, so hazards
/// overlapping during invulnerability stay in play.
fn resolve_collisions(session: &mut GameSession, now: f64) {
    for projectile in &mut session.projectiles {
        for collectible in &mut session.collectibles {
            if projectile.marked_for_deletion {
                break;
            }
            if collectible.marked_for_deletion {
                continue;
            }
            if circles_overlap(&projectile.circle, &collectible.circle) {
                projectile.marked_for_deletion = true;
                collectible.marked_for_deletion = true;
            }
        }
    }

    let player_box = session.player.collision_box;
    let player = &mut session.player;
    let life_animations = &mut session.life_animations;

    for collectible in &mut session.collectibles {
        if collectible.marked_for_deletion {
            continue;
        }
        if rects_overlap(&player_box, &collectible.hit_box()) && player.take_damage() {
            collectible.marked_for_deletion = true;
            life_animations.push(LifeAnimation {
                index: player.health,
                start_time: now,
            });
        }
    }
    for drifter in &mut session.drifters {
        if drifter.marked_for_deletion {
            continue;
        }
        if rects_overlap(&player_box, &drifter.hit_box()) && player.take_damage() {
            drifter.marked_for_deletion = true;
            life_animations.push(LifeAnimation {
                index: player.health,
                start_time: now,
            });
        }
    }

    if !session.player.is_alive() {
        start_game_over(session, now);
    }
}

fn start_game_over(session: &mut GameSession, now: f64) {
    session.phase = GamePhase::GameOver;
    session.game_over.start(now, &session.config.game_over);
    session.restart_button.rect.y = session.game_over.button_y;
    log::info!("Game over after {:.3}s", session.elapsed_ms() / 1000.0);
}

/// Drop flagged entities; retired projectiles go back to the pool
fn sweep(session: &mut GameSession) {
    session.collectibles.retain(|c| !c.marked_for_deletion);
    session.drifters.retain(|d| !d.marked_for_deletion);

    let mut i = 0;
    while i < session.projectiles.len() {
        if session.projectiles[i].marked_for_deletion {
            let projectile = session.projectiles.remove(i);
            session.pool.release(projectile);
        } else {
            i += 1;
        }
    }
}

/// Route a pointer click: restart from the game-over screen, otherwise shoot
pub fn handle_click(session: &mut GameSession, input: &mut InputSnapshot, pos: Vec2) -> ClickAction {
    input.set_pointer(pos);
    match session.phase {
        GamePhase::GameOver if session.restart_button.rect.contains(pos) => {
            session.restart();
            input.consume_fire();
            ClickAction::Restarted
        }
        GamePhase::GameOver => ClickAction::Ignored,
        GamePhase::Playing => {
            input.request_fire();
            ClickAction::Fired
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::entities::Projectile;
    use crate::sim::input::Direction;
    use proptest::prelude::*;

    const FRAME_MS: f32 = 1000.0 / 60.0;

    fn session() -> GameSession {
        GameSession::new(GameConfig::default(), 12345)
    }

    /// A session that never spawns on its own
    fn quiet_session() -> GameSession {
        let mut s = session();
        s.config.collectible.spawn_interval_ms = f32::MAX;
        s
    }

    fn push_drifter_on_player(s: &mut GameSession) {
        let drifter = drifter_on_player(s);
        s.drifters.push(drifter);
    }

    /// Step `frames` frames of 1/60 s starting at `*now`
    fn run(session: &mut GameSession, input: &mut InputSnapshot, now: &mut f64, frames: u32) {
        for _ in 0..frames {
            *now += FRAME_MS as f64;
            tick(session, input, FrameTime::new(*now, FRAME_MS));
        }
    }

    /// A stationary drifter centred on the player's hit box
    fn drifter_on_player(session: &GameSession) -> Drifter {
        let center = session.player.collision_box.center();
        let mut drifter = Drifter::new(
            center - Vec2::splat(40.0),
            1.0,
            0.0,
            0,
            &session.config.drifter,
        );
        drifter.speed = Vec2::ZERO;
        drifter
    }

    #[test]
    fn test_collectibles_spawn_on_interval() {
        let mut s = session();
        let mut input = InputSnapshot::new();
        let mut now = 0.0;
        // 900 ms interval: nothing after 53 frames of 16.7 ms, one by 55
        run(&mut s, &mut input, &mut now, 53);
        assert!(s.collectibles.is_empty());
        run(&mut s, &mut input, &mut now, 2);
        assert_eq!(s.collectibles.len(), 1);
    }

    #[test]
    fn test_drifters_need_a_collectible() {
        let mut s = session();
        let mut input = InputSnapshot::new();
        let mut now = 0.0;
        run(&mut s, &mut input, &mut now, 10);
        assert!(s.drifters.is_empty());
        assert_eq!(s.drifter_cooldown, 0);

        let cfg = s.config.collectible.clone();
        s.collectibles
            .push(Collectible::new(Vec2::new(1000.0, 50.0), 0.5, Vec2::ZERO, &cfg));
        run(&mut s, &mut input, &mut now, 1);
        assert_eq!(s.drifters.len(), 1);
        assert!((100..=600).contains(&s.drifter_cooldown));
    }

    #[test]
    fn test_fire_uses_pointer_and_pool() {
        let mut s = session();
        let mut input = InputSnapshot::new();
        let mut now = 0.0;
        let target = s.muzzle() + Vec2::new(0.0, -100.0);

        assert_eq!(handle_click(&mut s, &mut input, target), ClickAction::Fired);
        run(&mut s, &mut input, &mut now, 1);
        assert_eq!(s.projectiles.len(), 1);
        assert!(!input.fire_requested());
        assert!((s.projectiles[0].dir - Vec2::new(0.0, -1.0)).length() < 1e-5);

        // Fly off the top, get swept into the pool, then get reused
        run(&mut s, &mut input, &mut now, 200);
        assert!(s.projectiles.is_empty());
        assert_eq!(s.pool.len(), 1);

        handle_click(&mut s, &mut input, target);
        run(&mut s, &mut input, &mut now, 1);
        assert_eq!(s.projectiles.len(), 1);
        assert_eq!(s.pool.created(), 1);
        assert!(s.pool.is_empty());
    }

    #[test]
    fn test_projectile_destroys_collectible() {
        let mut s = session();
        let mut input = InputSnapshot::new();
        let mut now = 0.0;
        let cfg = s.config.collectible.clone();
        let heart = Collectible::new(Vec2::new(100.0, 100.0), 1.0, Vec2::ZERO, &cfg);
        let center = heart.circle.center;
        s.collectibles.push(heart);
        let shot = Projectile::new(center, center + Vec2::X, &s.config.projectile);
        s.projectiles.push(shot);

        run(&mut s, &mut input, &mut now, 1);
        assert!(s.collectibles.is_empty());
        assert!(s.projectiles.is_empty());
        assert_eq!(s.pool.len(), 1);
        assert_eq!(s.player.health, 3);
    }

    #[test]
    fn test_overlapping_hazards_only_one_hit() {
        let mut s = quiet_session();
        let mut input = InputSnapshot::new();
        let mut now = 0.0;
        push_drifter_on_player(&mut s);
        push_drifter_on_player(&mut s);

        run(&mut s, &mut input, &mut now, 1);
        assert_eq!(s.player.health, 2);
        // Only the hazard that dealt damage is removed
        assert_eq!(s.drifters.len(), 1);
        assert_eq!(s.life_animations.len(), 1);
        assert_eq!(s.life_animations[0].index, 2);

        // Still overlapping, still invulnerable: no further damage
        run(&mut s, &mut input, &mut now, 30);
        assert_eq!(s.player.health, 2);
        assert_eq!(s.drifters.len(), 1);
    }

    #[test]
    fn test_three_hits_game_over_then_restart() {
        let mut s = quiet_session();
        let mut input = InputSnapshot::new();
        let mut now = 0.0;

        for expected in [2u8, 1, 0] {
            push_drifter_on_player(&mut s);
            run(&mut s, &mut input, &mut now, 1);
            assert_eq!(s.player.health, expected);
            if expected > 0 {
                // Wait out the invulnerability window
                run(&mut s, &mut input, &mut now, 125);
                assert!(!s.player.invulnerable);
                s.drifters.clear();
            }
        }
        assert!(s.is_game_over());

        // Frozen: nothing spawns or moves
        let player_pos = s.player.pos;
        let collectibles = s.collectibles.len();
        run(&mut s, &mut input, &mut now, 120);
        assert_eq!(s.player.pos, player_pos);
        assert_eq!(s.collectibles.len(), collectibles);

        // Drop sequence has settled; click the restart button
        let button = s.restart_button.rect;
        assert_eq!(button.y, s.game_over.target_y + 252.0 + 50.0);
        let inside = button.center();
        assert_eq!(handle_click(&mut s, &mut input, inside), ClickAction::Restarted);
        assert_eq!(s.player.health, 3);
        assert!(!s.is_game_over());
        assert!(s.drifters.is_empty() && s.collectibles.is_empty());
        assert!(s.life_animations.is_empty());
        assert_eq!(s.elapsed_ms(), 0.0);
    }

    #[test]
    fn test_click_outside_button_during_game_over() {
        let mut s = quiet_session();
        let mut input = InputSnapshot::new();
        s.player.health = 1;
        push_drifter_on_player(&mut s);
        let mut now = 0.0;
        run(&mut s, &mut input, &mut now, 1);
        assert!(s.is_game_over());

        assert_eq!(
            handle_click(&mut s, &mut input, Vec2::new(5.0, 5.0)),
            ClickAction::Ignored
        );
        assert!(!input.fire_requested());
        assert!(s.is_game_over());
    }

    #[test]
    fn test_restart_button_hover() {
        let mut s = quiet_session();
        let mut input = InputSnapshot::new();
        s.player.health = 1;
        push_drifter_on_player(&mut s);
        let mut now = 0.0;
        run(&mut s, &mut input, &mut now, 1);
        run(&mut s, &mut input, &mut now, 150);

        input.set_pointer(s.restart_button.rect.center());
        run(&mut s, &mut input, &mut now, 1);
        assert!(s.restart_button.hovered);

        input.set_pointer(Vec2::ZERO);
        run(&mut s, &mut input, &mut now, 1);
        assert!(!s.restart_button.hovered);
    }

    #[test]
    fn test_life_animations_expire() {
        let mut s = quiet_session();
        let mut input = InputSnapshot::new();
        push_drifter_on_player(&mut s);
        let mut now = 0.0;
        run(&mut s, &mut input, &mut now, 1);
        assert_eq!(s.life_animations.len(), 1);
        run(&mut s, &mut input, &mut now, 61);
        assert!(s.life_animations.is_empty());
    }

    #[test]
    fn test_movement_input_drives_player() {
        let mut s = session();
        let mut input = InputSnapshot::new();
        input.press(Direction::Left);
        let mut now = 0.0;
        let start = s.player.pos.x;
        run(&mut s, &mut input, &mut now, 10);
        assert!(s.player.pos.x < start);
        assert_eq!(s.player.frame_row, 7);
    }

    #[test]
    fn test_determinism() {
        let mut a = session();
        let mut b = session();
        let mut input_a = InputSnapshot::new();
        let mut input_b = InputSnapshot::new();
        let (mut now_a, mut now_b) = (0.0, 0.0);
        run(&mut a, &mut input_a, &mut now_a, 600);
        run(&mut b, &mut input_b, &mut now_b, 600);
        assert_eq!(a.collectibles.len(), b.collectibles.len());
        assert_eq!(a.drifters.len(), b.drifters.len());
        assert_eq!(a.drifter_cooldown, b.drifter_cooldown);
        assert_eq!(a.player.health, b.player.health);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_spawn_caps_hold(seed in any::<u64>(), frames in 100u32..1500, delta in 5.0f32..120.0) {
            let mut s = GameSession::new(GameConfig::default(), seed);
            // Keep the player alive so spawning never stops
            s.player.health = u8::MAX;
            s.player.max_health = u8::MAX;
            let mut input = InputSnapshot::new();
            let mut now = 0.0f64;
            for _ in 0..frames {
                now += delta as f64;
                tick(&mut s, &mut input, FrameTime::new(now, delta));
                prop_assert!(s.collectibles.len() <= 10);
                prop_assert!(s.drifters.len() <= 5);
            }
        }
    }
}
