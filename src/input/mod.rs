use macroquad::prelude::*;

use crate::application::Simulation;

/// Process keyboard input functionally
pub fn process_keyboard_input(simulation: Simulation) -> Simulation {
    type KeyAction = (KeyCode, fn(Simulation) -> Simulation);

    let actions: [KeyAction; 4] = [
        (KeyCode::Space, Simulation::toggle_running),
        (KeyCode::Right, Simulation::queue_frame),
        (KeyCode::Up, |s| s.adjust_speed(1.0)),
        (KeyCode::Down, |s| s.adjust_speed(-1.0)),
    ];

    actions.iter().fold(simulation, |s, (key, action)| {
        if is_key_pressed(*key) { action(s) } else { s }
    })
}

/// 'R' rebuilds the automaton from the starting settings
pub fn reset_requested() -> bool {
    is_key_pressed(KeyCode::R)
}
