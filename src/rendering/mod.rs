use macroquad::prelude::*;

use crate::application::Simulation;
use crate::domain::PixelBuffer;

/// Space above the grid reserved for the status line
pub const TOP_MARGIN: f32 = 42.0;

/// GPU copy of the simulation's last frame.
/// Re-uploaded only when the generation changes.
pub struct FrameTexture {
    texture: Option<Texture2D>,
    generation: Option<u64>,
}

impl FrameTexture {
    pub fn new() -> Self {
        Self { texture: None, generation: None }
    }

    /// Force the next `sync` to upload
    pub fn invalidate(&mut self) {
        self.generation = None;
    }

    /// Upload the simulation's frame if it changed since the last call
    pub fn sync(&mut self, simulation: &Simulation) {
        let generation = simulation.generation();
        if self.generation == Some(generation) {
            return;
        }
        self.texture = upload(simulation.frame());
        self.generation = Some(generation);
    }

    /// Draw the frame scaled by `scale` screen pixels per cell
    pub fn draw(&self, scale: f32) {
        let Some(texture) = &self.texture else {
            return;
        };
        draw_texture_ex(
            texture,
            0.0,
            TOP_MARGIN,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(texture.width() * scale, texture.height() * scale)),
                ..Default::default()
            },
        );
    }
}

impl Default for FrameTexture {
    fn default() -> Self {
        Self::new()
    }
}

/// Nearest-filtered texture of `frame`; `None` for an empty frame
fn upload(frame: &PixelBuffer) -> Option<Texture2D> {
    let (width, height) = frame.dimensions();
    if frame.is_empty() {
        return None;
    }
    let width = u16::try_from(width).ok()?;
    let height = u16::try_from(height).ok()?;
    let texture = Texture2D::from_rgba8(width, height, &frame.to_rgba8());
    texture.set_filter(FilterMode::Nearest);
    Some(texture)
}

/// Status line: run state, queued steps, generation and timings, with the
/// settings summary underneath
pub fn draw_status(simulation: &Simulation, label: &str) {
    let status = format!(
        "playing: {}; framesToGen: {}; generation: {}; step {:.1}ms; render {:.1}ms; {:.0} gen/s",
        simulation.is_running,
        simulation.frames_to_generate,
        simulation.generation(),
        simulation.last_step_time_ms,
        simulation.last_render_time_ms,
        simulation.updates_per_second,
    );
    draw_text(&status, 8.0, 17.0, 18.0, MAGENTA);
    draw_text(label, 8.0, 35.0, 18.0, GRAY);
}
