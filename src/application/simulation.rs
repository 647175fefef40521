use std::time::Instant;

use crate::domain::{Automaton, PixelBuffer};

/// What the front end needs from an automaton, independent of its state type.
pub trait Engine: Send {
    fn step(&mut self);

    fn render_into(&self, buffer: &mut PixelBuffer);

    fn generation(&self) -> u64;

    fn dimensions(&self) -> (usize, usize);
}

impl<S: Clone + Default + Send + Sync> Engine for Automaton<S> {
    fn step(&mut self) {
        Automaton::step(self);
    }

    fn render_into(&self, buffer: &mut PixelBuffer) {
        Automaton::render_into(self, buffer);
    }

    fn generation(&self) -> u64 {
        Automaton::generation(self)
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }
}

/// Simulation paces an engine for the front end.
/// It steps on its own cadence and keeps the latest rendered frame.
pub struct Simulation {
    engine: Box<dyn Engine>,
    frame: PixelBuffer,
    pub is_running: bool,
    /// Single steps requested while paused
    pub frames_to_generate: u32,
    pub updates_per_second: f32,
    pub update_timer: f32,
    pub last_step_time_ms: f32,   // Step performance metric
    pub last_render_time_ms: f32, // Projection performance metric
}

impl Simulation {
    /// Wrap `engine` and render its initial state
    pub fn new(engine: Box<dyn Engine>, updates_per_second: f32) -> Self {
        let mut simulation = Self {
            engine,
            frame: PixelBuffer::default(),
            is_running: false,
            frames_to_generate: 0,
            updates_per_second: updates_per_second.clamp(1.0, 60.0),
            update_timer: 0.0,
            last_step_time_ms: 0.0,
            last_render_time_ms: 0.0,
        };
        simulation.render();
        simulation
    }

    /// Swap in a freshly built engine, keeping pacing settings
    pub fn replace_engine(&mut self, engine: Box<dyn Engine>) {
        self.engine = engine;
        self.frames_to_generate = 0;
        self.update_timer = 0.0;
        self.render();
    }

    /// Set running state (builder pattern)
    pub fn with_running(mut self, running: bool) -> Self {
        self.is_running = running;
        self
    }

    /// Toggle play/pause; drops any queued single steps
    pub fn toggle_running(mut self) -> Self {
        self.is_running = !self.is_running;
        self.frames_to_generate = 0;
        self
    }

    /// Queue one more generation to run while paused
    pub fn queue_frame(mut self) -> Self {
        self.frames_to_generate = self.frames_to_generate.saturating_add(1);
        self
    }

    /// Adjust simulation speed
    pub fn adjust_speed(mut self, delta: f32) -> Self {
        self.updates_per_second = (self.updates_per_second + delta).clamp(1.0, 60.0);
        self
    }

    /// Update simulation by one frame
    pub fn tick(mut self, delta_time: f32) -> Self {
        if self.is_running {
            self.update_timer += delta_time;
            if self.update_timer >= 1.0 / self.updates_per_second {
                self.advance();
                self.update_timer = 0.0;
            }
        } else if self.frames_to_generate > 0 {
            self.frames_to_generate -= 1;
            self.advance();
        }
        self
    }

    pub fn generation(&self) -> u64 {
        self.engine.generation()
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.engine.dimensions()
    }

    /// Latest projection of the engine's readable buffer
    pub fn frame(&self) -> &PixelBuffer {
        &self.frame
    }

    fn advance(&mut self) {
        let start = Instant::now();
        self.engine.step();
        self.last_step_time_ms = start.elapsed().as_secs_f32() * 1000.0;
        self.render();
    }

    fn render(&mut self) {
        let start = Instant::now();
        self.engine.render_into(&mut self.frame);
        self.last_render_time_ms = start.elapsed().as_secs_f32() * 1000.0;
    }
}
