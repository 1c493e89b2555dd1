//! Read-only frame rendering. Everything drawn here is derived from session
//! state; no game rules live on this side.

use core::content::Cell;
use core::state::NearbyInteractable;
use core::{BattlePhase, Mode, Pos, Session};
use macroquad::prelude::*;

const TILE: f32 = 40.0;
const ROOM_ORIGIN_X: f32 = 60.0;
const ROOM_ORIGIN_Y: f32 = 60.0;
const DIALOGUE_BOX_Y: f32 = 380.0;
const TEXT_SIZE: u16 = 22;

const FLOOR_COLOR: Color = Color::new(0.13, 0.12, 0.14, 1.0);
const WALL_COLOR: Color = Color::new(0.32, 0.30, 0.34, 1.0);
const DOOR_COLOR: Color = Color::new(0.45, 0.30, 0.20, 1.0);
const ITEM_COLOR: Color = Color::new(0.55, 0.50, 0.25, 1.0);
const PLAYER_COLOR: Color = Color::new(0.85, 0.85, 0.90, 1.0);
const KEY_COLOR: Color = Color::new(0.95, 0.85, 0.30, 1.0);

pub fn draw_frame(session: &Session, font: Option<&Font>) {
    clear_background(BLACK);
    match session.mode() {
        Mode::Title => draw_title(font),
        Mode::Explore => draw_explore(session, font),
        Mode::Battle => draw_battle(session, font),
        Mode::Ending => draw_ending(font),
    }
    draw_dialogue(session, font);
    draw_overlays(session, font);

    let fade = session.fx.fade_alpha();
    if fade > 0.0 {
        draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color::new(0.0, 0.0, 0.0, fade));
    }
}

fn text(line: &str, x: f32, y: f32, size: u16, color: Color, font: Option<&Font>) {
    draw_text_ex(line, x, y, TextParams { font, font_size: size, color, ..Default::default() });
}

fn shake_offset(session: &Session) -> (f32, f32) {
    if !session.fx.is_shaking() {
        return (0.0, 0.0);
    }
    let t = get_time() as f32;
    ((t * 91.0).sin() * 3.0, (t * 57.0).cos() * 3.0)
}

fn draw_title(font: Option<&Font>) {
    text("妈妈的门", 240.0, 180.0, 42, PLAYER_COLOR, font);
    text("Z 开始", 270.0, 260.0, TEXT_SIZE, GRAY, font);
    text("C 继续", 270.0, 290.0, TEXT_SIZE, GRAY, font);
}

fn draw_ending(font: Option<&Font>) {
    text("...", 300.0, 240.0, 42, GRAY, font);
}

fn draw_explore(session: &Session, font: Option<&Font>) {
    let Some(room) = session.current_room() else { return };
    // Flicker blanks the room on alternating frames.
    if session.fx.is_flickering() && (get_time() * 30.0) as u64 % 2 == 0 {
        return;
    }
    let (sx, sy) = shake_offset(session);

    for y in 0..room.height() {
        for x in 0..room.width() {
            let pos = Pos::new(x as i32, y as i32);
            let Some(cell) = room.cell_at(pos) else { continue };
            let despawned = session.world.despawned.contains(&(room.key, pos));
            let color = match cell {
                Cell::Wall => WALL_COLOR,
                Cell::Floor => FLOOR_COLOR,
                Cell::Door(_) => DOOR_COLOR,
                Cell::Item(_) if despawned => FLOOR_COLOR,
                Cell::Item(_) => ITEM_COLOR,
            };
            draw_rectangle(
                ROOM_ORIGIN_X + sx + x as f32 * TILE,
                ROOM_ORIGIN_Y + sy + y as f32 * TILE,
                TILE - 2.0,
                TILE - 2.0,
                color,
            );
        }
    }

    if session.world.roaming_key_room == Some(room.key)
        && let Some(spot) = room.key_spot
    {
        draw_circle(
            ROOM_ORIGIN_X + sx + spot.x as f32 * TILE + TILE / 2.0,
            ROOM_ORIGIN_Y + sy + spot.y as f32 * TILE + TILE / 2.0,
            8.0,
            KEY_COLOR,
        );
    }

    let player = session.world.pos;
    draw_rectangle(
        ROOM_ORIGIN_X + sx + player.x as f32 * TILE + 6.0,
        ROOM_ORIGIN_Y + sy + player.y as f32 * TILE + 6.0,
        TILE - 14.0,
        TILE - 14.0,
        PLAYER_COLOR,
    );

    text(room.name, ROOM_ORIGIN_X, 40.0, TEXT_SIZE, GRAY, font);
    draw_hp(session, font);

    if let Some(nearby) = session.world.nearby {
        let prompt = match nearby {
            NearbyInteractable::RoamingKey { .. } => "Z 拾取钥匙".to_string(),
            NearbyInteractable::Item { key, .. } => session
                .content()
                .item(key)
                .map_or_else(|| "Z".to_string(), |item| format!("Z {}{}", item.action, item.name)),
        };
        text(&prompt, ROOM_ORIGIN_X, DIALOGUE_BOX_Y - 12.0, 18, KEY_COLOR, font);
    }
}

fn draw_hp(session: &Session, font: Option<&Font>) {
    let label = format!("HP {}/{}", session.world.hp, session.world.max_hp);
    text(&label, 480.0, 40.0, TEXT_SIZE, PLAYER_COLOR, font);
}

fn draw_battle(session: &Session, font: Option<&Font>) {
    let Some(battle) = session.battle() else { return };
    let (sx, sy) = shake_offset(session);

    text(battle.enemy_name(), 300.0, 80.0 + sy, 32, RED, font);
    draw_hp(session, font);

    if battle.phase == BattlePhase::Bullet {
        let area = battle.arena();
        draw_rectangle_lines(area.x + sx, area.y + sy, area.w, area.h, 2.0, WHITE);
        // The approaching presence sweeps down the arena as a band.
        draw_rectangle(area.x + sx, battle.enemy_y + sy - 4.0, area.w, 8.0, RED);
        draw_circle(battle.player_x + sx, battle.player_y + sy, 6.0, PLAYER_COLOR);
    }
}

fn draw_dialogue(session: &Session, font: Option<&Font>) {
    if let Some(page) = session.dialogue.current_page() {
        draw_rectangle(40.0, DIALOGUE_BOX_Y, 560.0, 80.0, Color::new(0.0, 0.0, 0.0, 0.85));
        draw_rectangle_lines(40.0, DIALOGUE_BOX_Y, 560.0, 80.0, 2.0, GRAY);
        text(page, 56.0, DIALOGUE_BOX_Y + 34.0, TEXT_SIZE, WHITE, font);
        text("Z", 580.0, DIALOGUE_BOX_Y + 70.0, 16, GRAY, font);
        return;
    }
    if let Some((prompt, labels, selected)) = session.dialogue.current_options() {
        let height = 40.0 + labels.len() as f32 * 28.0;
        let top = DIALOGUE_BOX_Y + 80.0 - height;
        draw_rectangle(40.0, top, 560.0, height, Color::new(0.0, 0.0, 0.0, 0.85));
        draw_rectangle_lines(40.0, top, 560.0, height, 2.0, GRAY);
        text(prompt, 56.0, top + 26.0, TEXT_SIZE, GRAY, font);
        for (index, label) in labels.iter().enumerate() {
            let y = top + 54.0 + index as f32 * 28.0;
            let color = if index == selected { KEY_COLOR } else { WHITE };
            if index == selected {
                text(">", 56.0, y, TEXT_SIZE, color, font);
            }
            text(label, 76.0, y, TEXT_SIZE, color, font);
        }
    }
}

fn draw_overlays(session: &Session, font: Option<&Font>) {
    if let Some(voice) = &session.dialogue.mom_voice {
        text(voice.text, 160.0, 28.0, 20, Color::new(0.8, 0.2, 0.2, 0.9), font);
    }
    if let Some(gaslight) = &session.dialogue.gaslight {
        let alpha = gaslight.alpha;
        draw_rectangle(
            0.0,
            0.0,
            screen_width(),
            screen_height(),
            Color::new(0.1, 0.0, 0.0, 0.6 * alpha),
        );
        for (index, line) in gaslight.text.split('\n').enumerate() {
            text(
                line,
                140.0,
                200.0 + index as f32 * 40.0,
                30,
                Color::new(0.9, 0.15, 0.15, alpha),
                font,
            );
        }
    }
}
