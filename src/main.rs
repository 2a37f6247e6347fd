use macroquad::prelude::*;

use block_drop::audio::AudioBoard;
use block_drop::config::Settings;
use block_drop::frame::FrameLimiter;
use block_drop::input;
use block_drop::render::{Renderer, WINDOW_HEIGHT, WINDOW_WIDTH};
use block_drop::GameSession;

fn window_conf() -> Conf {
    Conf {
        window_title: "Block Drop".to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("block drop starting");

    let settings = Settings::load_or_default();
    // Window close becomes a regular quit request handled below.
    prevent_quit();

    let mut audio = AudioBoard::open(&settings);
    if !audio.is_enabled() {
        log::info!("running without sound");
    }
    let renderer = Renderer::load(&settings.assets.font).await;
    let mut session = GameSession::new();
    let mut limiter = FrameLimiter::new(settings.target_fps);
    log::debug!("frame budget {:?}", limiter.target());

    audio.play_music();

    loop {
        limiter.begin();

        let frame = input::poll();
        if frame.quit {
            log::info!("quit, score {}", session.score());
            break;
        }
        for press in frame.presses {
            session.handle_press(press);
        }
        session.update(get_frame_time(), frame.soft_drop_held);
        for event in session.drain_events() {
            log::trace!("{event:?}");
            audio.on_event(event);
        }

        renderer.draw(&session);

        limiter.wait();
        next_frame().await;
    }
}
