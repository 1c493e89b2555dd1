//! Window configuration for the desktop build.

use macroquad::window::Conf;

pub const WINDOW_TITLE: &str = "妈妈的门";

const DEFAULT_WINDOW_WIDTH: i32 = 640;
const DEFAULT_WINDOW_HEIGHT: i32 = 480;

pub fn build_window_conf() -> Conf {
    Conf {
        window_title: WINDOW_TITLE.to_owned(),
        window_width: DEFAULT_WINDOW_WIDTH,
        window_height: DEFAULT_WINDOW_HEIGHT,
        // Linux desktop sessions may not scale low-DPI framebuffers
        // automatically; request a high-DPI framebuffer up front.
        high_dpi: true,
        ..Default::default()
    }
}
