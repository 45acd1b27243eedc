//! Scene composition
//!
//! Back to front: parallax layers, collectibles, projectiles, drifters, the
//! player, the HUD, then the game-over overlay when the run has ended.

use glam::Vec2;

use super::{Canvas, Sprite, TextStyle};
use crate::sim::{GameSession, Rect};

const BLACK: [f32; 3] = [0.0, 0.0, 0.0];
const TIMER_FONT: &str = "bold 35px Arial";
const TIMER_COLOR: &str = "white";
/// Gap between the last life icon and the timer
const TIMER_GAP: f32 = 20.0;
/// Timer baseline below the top of the life row
const TIMER_BASELINE: f32 = 30.0;

/// Format elapsed milliseconds as `SS.mmm`
pub fn format_elapsed(ms: f64) -> String {
    let total = ms.max(0.0).floor() as u64;
    format!("{:02}.{:03}", total / 1000, total % 1000)
}

/// Draw one full frame of `session`
pub fn draw_scene(session: &GameSession, canvas: &mut impl Canvas) {
    let pf = &session.config.playfield;
    canvas.clear(pf.width, pf.height);

    draw_background(session, canvas);
    draw_entities(session, canvas);
    draw_player(session, canvas);
    draw_hud(session, canvas);
    if session.is_game_over() {
        draw_game_over(session, canvas);
    }
}

fn draw_background(session: &GameSession, canvas: &mut impl Canvas) {
    for layer in &session.layers {
        for x in layer.tile_positions() {
            canvas.draw_image(
                layer.kind.into(),
                None,
                Rect::new(x, 0.0, layer.width, layer.height),
                1.0,
            );
        }
    }
}

fn draw_entities(session: &GameSession, canvas: &mut impl Canvas) {
    for collectible in session.collectibles.iter().filter(|c| !c.marked_for_deletion) {
        let sheet = collectible.sprite_size;
        let src = Rect::new(sheet.x * collectible.frames.frame as f32, 0.0, sheet.x, sheet.y);
        canvas.draw_image(Sprite::Collectible, Some(src), collectible.bounds(), 1.0);
    }

    for projectile in session.projectiles.iter().filter(|p| !p.marked_for_deletion) {
        canvas.draw_image_rotated(
            Sprite::Projectile,
            projectile.pos,
            projectile.angle,
            projectile.size,
        );
    }

    for drifter in session.drifters.iter().filter(|d| !d.marked_for_deletion) {
        canvas.draw_image_rotated(
            Sprite::Drifter(drifter.variant),
            drifter.bounds().center(),
            drifter.angle,
            drifter.size,
        );
    }
}

fn draw_player(session: &GameSession, canvas: &mut impl Canvas) {
    let player = &session.player;
    let cfg = &session.config.player;
    let src = Rect::new(
        cfg.sprite_width * player.frames.frame as f32,
        cfg.sprite_height * player.frame_row as f32,
        cfg.sprite_width,
        cfg.sprite_height,
    );
    canvas.draw_image(Sprite::Player, Some(src), player.bounds(), player.draw_alpha());
}

/// Alpha of life icon `index`, or `None` while it is blinked off
fn life_icon_alpha(session: &GameSession, index: u8) -> Option<f32> {
    let hud = &session.config.hud;
    let animation = session
        .life_animations
        .iter()
        .find(|anim| anim.index == index);

    if let Some(anim) = animation {
        let elapsed = (session.current_time - anim.start_time).max(0.0) as f32;
        if elapsed < hud.life_animation_ms {
            let blink_on = (elapsed / hud.blink_ms).floor() as u32 % 2 == 0;
            return blink_on.then(|| 1.0 - elapsed / hud.life_animation_ms);
        }
    }

    if index < session.player.health {
        Some(1.0)
    } else {
        Some(hud.empty_alpha)
    }
}

fn draw_hud(session: &GameSession, canvas: &mut impl Canvas) {
    let hud = &session.config.hud;
    let max_health = session.player.max_health;

    for index in 0..max_health {
        if let Some(alpha) = life_icon_alpha(session, index) {
            let dst = Rect::new(
                hud.origin_x + index as f32 * hud.life_spacing,
                hud.origin_y,
                hud.life_size,
                hud.life_size,
            );
            canvas.draw_image(Sprite::Life, None, dst, alpha);
        }
    }

    if !session.is_game_over() {
        let pos = Vec2::new(
            hud.origin_x + max_health as f32 * hud.life_spacing + TIMER_GAP,
            hud.origin_y + TIMER_BASELINE,
        );
        let style = TextStyle {
            font: TIMER_FONT.into(),
            color: TIMER_COLOR.into(),
        };
        canvas.fill_text(&format_elapsed(session.elapsed_ms()), pos, &style);
    }
}

fn draw_game_over(session: &GameSession, canvas: &mut impl Canvas) {
    let cfg = &session.config.game_over;
    let anim = &session.game_over;
    let field = session.field();

    canvas.fill_rect(field, BLACK, anim.darkness);

    let panel = Rect::new(
        (field.width - cfg.panel_width) / 2.0,
        anim.panel_y,
        cfg.panel_width,
        cfg.panel_height,
    );
    canvas.draw_image(Sprite::GameOver, None, panel, 1.0);

    let button = &session.restart_button;
    let sprite = if button.hovered {
        Sprite::TryAgainHover
    } else {
        Sprite::TryAgain
    };
    canvas.draw_image(sprite, None, button.rect, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::renderer::{DrawCommand, DrawList};
    use crate::sim::{
        Collectible, Drifter, FrameTime, GamePhase, InputSnapshot, LifeAnimation, Projectile, tick,
    };

    fn session() -> GameSession {
        let mut s = GameSession::new(GameConfig::default(), 3);
        let cfg = s.config.clone();
        s.collectibles.push(Collectible::new(
            Vec2::new(900.0, 100.0),
            0.5,
            Vec2::ZERO,
            &cfg.collectible,
        ));
        s.projectiles.push(Projectile::new(
            Vec2::new(300.0, 300.0),
            Vec2::new(400.0, 300.0),
            &cfg.projectile,
        ));
        s.drifters
            .push(Drifter::new(Vec2::new(1000.0, 400.0), 1.0, 0.0, 2, &cfg.drifter));
        s
    }

    fn life_alphas(list: &DrawList) -> Vec<f32> {
        list.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image {
                    sprite: Sprite::Life,
                    alpha,
                    ..
                } => Some(*alpha),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0.0), "00.000");
        assert_eq!(format_elapsed(5_042.9), "05.042");
        assert_eq!(format_elapsed(83_100.0), "83.100");
        assert_eq!(format_elapsed(-4.0), "00.000");
    }

    #[test]
    fn test_draw_order() {
        let s = session();
        let mut list = DrawList::new();
        draw_scene(&s, &mut list);

        assert_eq!(list.commands[0], DrawCommand::Clear { width: 1280.0, height: 720.0 });
        let order = [
            Sprite::Sky,
            Sprite::Cloud,
            Sprite::Mountain,
            Sprite::Ground,
            Sprite::Collectible,
            Sprite::Projectile,
            Sprite::Drifter(2),
            Sprite::Player,
            Sprite::Life,
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|sprite| list.position_of(*sprite).unwrap_or(usize::MAX))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);
        assert_eq!(list.count_of(Sprite::Sky), 2);
        assert!(matches!(list.commands.last(), Some(DrawCommand::Text { .. })));
        assert_eq!(list.position_of(Sprite::GameOver), None);
    }

    #[test]
    fn test_flagged_entities_not_drawn() {
        let mut s = session();
        s.drifters[0].marked_for_deletion = true;
        let mut list = DrawList::new();
        draw_scene(&s, &mut list);
        assert_eq!(list.count_of(Sprite::Drifter(2)), 0);
    }

    #[test]
    fn test_player_source_rect_follows_row_and_frame() {
        let mut s = session();
        s.player.frame_row = 7;
        s.player.frames.frame = 3;
        let mut list = DrawList::new();
        draw_scene(&s, &mut list);
        let src = list.commands.iter().find_map(|c| match c {
            DrawCommand::Image {
                sprite: Sprite::Player,
                src,
                ..
            } => *src,
            _ => None,
        });
        let cfg = &s.config.player;
        assert_eq!(
            src,
            Some(Rect::new(
                cfg.sprite_width * 3.0,
                cfg.sprite_height * 7.0,
                cfg.sprite_width,
                cfg.sprite_height
            ))
        );
    }

    #[test]
    fn test_life_icons() {
        let mut s = session();
        s.player.health = 2;
        s.current_time = 1000.0;
        let mut list = DrawList::new();
        draw_scene(&s, &mut list);
        assert_eq!(life_alphas(&list), vec![1.0, 1.0, 0.3]);

        // Blinking on: faded by elapsed fraction
        s.life_animations.push(LifeAnimation {
            index: 2,
            start_time: 900.0,
        });
        draw_scene(&s, &mut list);
        let alphas = life_alphas(&list);
        assert_eq!(alphas.len(), 3);
        assert!((alphas[2] - 0.9).abs() < 1e-6);

        // Blinking off
        s.current_time = 960.0;
        draw_scene(&s, &mut list);
        assert_eq!(life_alphas(&list).len(), 2);
    }

    #[test]
    fn test_timer_text() {
        let mut s = session();
        s.start_time = Some(500.0);
        s.current_time = 12_845.0;
        let mut list = DrawList::new();
        draw_scene(&s, &mut list);
        let text = list.commands.iter().find_map(|c| match c {
            DrawCommand::Text { text, pos, style } => Some((text.clone(), *pos, style.clone())),
            _ => None,
        });
        let (text, pos, style) = text.expect("timer drawn");
        assert_eq!(text, "12.345");
        assert_eq!(pos, Vec2::new(20.0 + 3.0 * 45.0 + 20.0, 50.0));
        assert_eq!(style.font, "bold 35px Arial");
    }

    #[test]
    fn test_game_over_overlay_last() {
        let mut s = session();
        s.player.health = 1;
        let center = s.player.collision_box.center();
        let mut hazard = Drifter::new(center - Vec2::splat(40.0), 1.0, 0.0, 0, &s.config.drifter);
        hazard.speed = Vec2::ZERO;
        s.drifters.push(hazard);
        let mut input = InputSnapshot::new();
        tick(&mut s, &mut input, FrameTime::new(16.0, 16.0));
        tick(&mut s, &mut input, FrameTime::new(1016.0, 16.0));
        assert_eq!(s.phase, GamePhase::GameOver);

        let mut list = DrawList::new();
        draw_scene(&s, &mut list);
        let overlay = list
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::FillRect { .. }))
            .unwrap_or(0);
        assert!(overlay > list.position_of(Sprite::Player).unwrap_or(usize::MAX));
        assert!(list.position_of(Sprite::GameOver) > Some(overlay));
        assert!(list.position_of(Sprite::TryAgain) > list.position_of(Sprite::GameOver));
        assert!(!list.commands.iter().any(|c| matches!(c, DrawCommand::Text { .. })));
        match &list.commands[overlay] {
            DrawCommand::FillRect { alpha, .. } => assert!((alpha - 0.6).abs() < 1e-6),
            other => panic!("unexpected {:?}", other),
        }
    }
}
