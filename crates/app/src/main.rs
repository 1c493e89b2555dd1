use app::save_file::SaveFile;
use app::seed::{generate_runtime_seed, resolve_seed_from_args};
use macroquad::prelude::*;

mod frame_input;
mod render;
mod window_config;

use window_config::build_window_conf;

#[macroquad::main(build_window_conf)]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let seed = match resolve_seed_from_args(&args, generate_runtime_seed()) {
        Ok(choice) => choice.value(),
        Err(message) => {
            eprintln!("{message}");
            return;
        }
    };

    // CJK text needs a bundled face; the default font only covers ASCII.
    let font = load_ttf_font("assets/font.ttf").await.ok();
    let mut session = core::Session::new(seed);

    loop {
        if session.mode() == core::Mode::Title && is_key_pressed(KeyCode::C) {
            try_continue(&mut session);
        }

        session.update(frame_input::capture());

        if session.take_save_request() {
            let ok = write_save(&session, seed);
            session.resolve_save(ok);
        }
        // No audio assets are bundled; draining keeps the cue queue empty.
        session.fx.drain_cues();

        render::draw_frame(&session, font.as_ref());
        next_frame().await
    }
}

fn try_continue(session: &mut core::Session) {
    let Some(path) = SaveFile::get_default_path() else { return };
    match SaveFile::load_verified(&path) {
        Ok(save) => {
            if let Err(error) = session.restore(&save.snapshot) {
                eprintln!("save file no longer matches the world: {error:?}");
            }
        }
        Err(error) => eprintln!("could not load save: {error}"),
    }
}

fn write_save(session: &core::Session, seed: u64) -> bool {
    let Some(path) = SaveFile::get_default_path() else { return false };
    match SaveFile::capture(session, seed) {
        Ok(file) => file.write_atomic(&path).is_ok(),
        Err(_) => false,
    }
}
