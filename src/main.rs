use cellular_automata::{application::Simulation, config::Settings, input, logging, rendering};
use clap::Parser;
use macroquad::prelude::*;

fn window_conf() -> Conf {
    let settings = Settings::parse();
    Conf {
        window_title: "Cellular Automata".to_owned(),
        window_width: (settings.width as f32 * settings.scale) as i32,
        window_height: (settings.height as f32 * settings.scale + rendering::TOP_MARGIN) as i32,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let settings = Settings::parse();
    if let Err(err) = logging::init(settings.log_level) {
        eprintln!("logger already installed: {err}");
    }
    let label = settings.describe();
    log::info!("{}x{} grid, {label}", settings.width, settings.height);

    let mut simulation = Simulation::new(settings.build(), settings.speed).with_running(settings.playing);
    let mut frame = rendering::FrameTexture::new();

    loop {
        if input::reset_requested() {
            simulation.replace_engine(settings.build());
            frame.invalidate();
        }
        simulation = input::process_keyboard_input(simulation);
        simulation = simulation.tick(get_frame_time());

        clear_background(BLACK);
        frame.sync(&simulation);
        frame.draw(settings.scale);
        rendering::draw_status(&simulation, &label);

        next_frame().await;
    }
}
