use std::time::Instant;

use crate::{abs::App, config::Config, scene::Scene};

mod abs;
mod config;
mod logger;
mod render;
mod scene;

/// Exit code when the window or its GL context cannot be created.
const EXIT_INIT_FAILED: i32 = -1;
/// Exit code when the scene cannot be built, e.g. a shader fails to compile.
const EXIT_SCENE_FAILED: i32 = 1;

fn main() {
    let (config, config_error) = match Config::load(config::CONFIG_FILE) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let level = config.level_filter().unwrap_or(log::LevelFilter::Info);
    if let Err(e) = logger::setup(level) {
        eprintln!("failed to install logger: {e}");
    }
    if let Some(e) = config_error {
        log::warn!("{e}; using defaults");
    }
    if let Err(e) = config.level_filter() {
        log::warn!("{e}; logging at info");
    }

    let mut app = match App::new(&config.title, config.width, config.height, config.vsync) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(EXIT_INIT_FAILED);
        }
    };

    let scene = match Scene::new(&app.gl, &config) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(EXIT_SCENE_FAILED);
        }
    };
    log::debug!(
        "{} programs, {} textures, {} indices per quad",
        scene.program_count(),
        scene.texture_count(),
        scene.index_count()
    );

    let start = Instant::now();

    'running: loop {
        let mut resized = None;
        for event in app.event_pump.poll_iter() {
            match event {
                sdl2::event::Event::Quit { .. } => break 'running,
                sdl2::event::Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(width, height),
                    ..
                } => resized = Some((width, height)),
                _ => {}
            }
        }
        if let Some((width, height)) = resized {
            app.resize(width, height);
        }

        scene.render(start.elapsed().as_secs_f32());
        app.swap();
    }

    // GL objects go before the context that owns them.
    drop(scene);
    log::info!("window closed after {:.1}s", start.elapsed().as_secs_f32());
}
