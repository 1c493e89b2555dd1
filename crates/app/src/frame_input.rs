//! Keyboard sampling for one rendered frame.
//! Pressed keys drive menus and grid steps; held keys only matter to the
//! bullet phase, which reads continuous movement.

use core::{Dir, InputFrame};
use macroquad::prelude::{KeyCode, is_key_down, is_key_pressed};

pub fn capture() -> InputFrame {
    let dir_pressed = if is_key_pressed(KeyCode::Up) {
        Some(Dir::Up)
    } else if is_key_pressed(KeyCode::Down) {
        Some(Dir::Down)
    } else if is_key_pressed(KeyCode::Left) {
        Some(Dir::Left)
    } else if is_key_pressed(KeyCode::Right) {
        Some(Dir::Right)
    } else {
        None
    };

    InputFrame {
        dir_pressed,
        held_up: is_key_down(KeyCode::Up),
        held_down: is_key_down(KeyCode::Down),
        held_left: is_key_down(KeyCode::Left),
        held_right: is_key_down(KeyCode::Right),
        confirm: is_key_pressed(KeyCode::Z)
            || is_key_pressed(KeyCode::Enter)
            || is_key_pressed(KeyCode::Space),
        cancel: is_key_pressed(KeyCode::X) || is_key_pressed(KeyCode::Escape),
    }
}
