/// Terminal front end: owns the surface, the input and the frame loop
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::{debug, info};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use trishade_core::{render_mesh, FrameContext, Mesh, ViewerConfig};

pub mod cli;
pub mod input;
pub mod renderer;

pub use input::TerminalInput;
pub use renderer::AsciiRenderer;

const CONTROLS: &str =
    "WASD=Move E/Q=Up/Down Mouse/Arrows=Look XYZ=Rotate J/K=Scale Space=Spin Esc=Quit";

/// Main application struct for terminal mesh viewing
pub struct TerminalApp {
    mesh: Mesh,
    context: FrameContext,
    config: ViewerConfig,
    renderer: AsciiRenderer,
    input: TerminalInput,
    running: bool,
    target_frame_time: Duration,
    last_frame: Instant,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, config: ViewerConfig, target_fps: u32) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let renderer = AsciiRenderer::new(width as usize, height as usize);
        let (screen_width, screen_height) = renderer.screen_size();
        let now = Instant::now();

        Ok(Self {
            mesh,
            context: FrameContext::default(),
            config: config.with_screen_size(screen_width, screen_height),
            renderer,
            input: TerminalInput::default(),
            running: true,
            target_frame_time: Duration::from_secs(1) / target_fps.max(1),
            last_frame: now,
            last_fps_sample: now,
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        let release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
        self.input = TerminalInput::new(release_events);
        debug!("Key release reporting: {}", release_events);

        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;
        if release_events {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }

        let result = self.main_loop();

        result.and(restore_terminal(release_events))
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.last_frame = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            self.handle_events()?;
            if self.input.quit_requested() {
                self.running = false;
                break;
            }

            let delta = frame_start.duration_since(self.last_frame).as_secs_f64();
            self.last_frame = frame_start;
            self.update(delta);

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.target_frame_time {
                std::thread::sleep(self.target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            let window = now - self.last_fps_sample;
            if window.as_secs() >= 1 {
                self.fps = self.frame_count as f32 / window.as_secs_f32();
                self.frame_count = 0;
                self.last_fps_sample = now;
            }
        }

        info!("Viewer stopped");
        Ok(())
    }

    fn handle_events(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            if let Event::Resize(width, height) = event {
                self.resize(width, height);
            }
            self.input.handle_event(&event);
        }
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.renderer.resize(width as usize, height as usize);
        let (screen_width, screen_height) = self.renderer.screen_size();
        self.config = self
            .config
            .clone()
            .with_screen_size(screen_width, screen_height);
        debug!("Resized to {}x{} cells", width, height);
    }

    fn update(&mut self, delta: f64) {
        let frame_input = self.input.take_frame();
        self.context.update(&frame_input, delta, &self.config);
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();

        render_mesh(
            &self.mesh,
            &self.context.camera,
            &self.context.mesh_transform,
            &self.config,
            &mut self.renderer,
        );

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let name = self.mesh.name.as_deref().unwrap_or("mesh");
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!("Trishade | {} | FPS: {:.1} | {}", name, self.fps, CONTROLS)),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Undo every terminal mode change, even when an earlier step fails
fn restore_terminal(release_events: bool) -> io::Result<()> {
    let mut stdout = stdout();
    let pop_flags = if release_events {
        execute!(stdout, PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    first_error([
        pop_flags,
        terminal::disable_raw_mode(),
        execute!(stdout, DisableMouseCapture),
        execute!(stdout, terminal::LeaveAlternateScreen, cursor::Show),
    ])
}

/// Keep the first error in `results`; every step has already run
fn first_error<const N: usize>(results: [io::Result<()>; N]) -> io::Result<()> {
    results.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_wins() {
        let result = first_error([
            Ok(()),
            Err(io::Error::new(io::ErrorKind::Other, "pop flags")),
            Err(io::Error::new(io::ErrorKind::Other, "raw mode")),
        ]);
        assert_eq!(result.unwrap_err().to_string(), "pop flags");
    }

    #[test]
    fn test_all_steps_ok() {
        assert!(first_error([Ok(()), Ok(()), Ok(())]).is_ok());
    }
}
