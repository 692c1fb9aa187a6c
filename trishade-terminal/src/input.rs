/// Terminal key and mouse events folded into an input snapshot
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use trishade_core::InputState;

/// Look units per terminal column of mouse travel
pub const LOOK_UNITS_PER_COLUMN: f64 = 8.0;
/// Rows are about twice as tall as columns are wide
pub const LOOK_UNITS_PER_ROW: f64 = 16.0;
/// Look units added by one arrow key press
pub const ARROW_LOOK_STEP: f64 = 20.0;

/// Tracks held controls across terminal events
#[derive(Debug, Default)]
pub struct TerminalInput {
    state: InputState,
    /// Whether the terminal reports key releases
    release_events: bool,
    last_mouse: Option<(u16, u16)>,
    quit: bool,
}

impl TerminalInput {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            ..Self::default()
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::FocusLost => self.last_mouse = None,
            _ => {}
        }
    }

    /// Hand out this frame's snapshot and roll over to the next frame
    ///
    /// Without release events a press only holds its control for the frame it
    /// arrived in; key repeat keeps it going while the key stays down.
    pub fn take_frame(&mut self) -> InputState {
        let frame = self.state;
        if self.release_events {
            self.state.rollover();
        } else {
            self.state = InputState::default();
        }
        frame
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        let pressed = match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => true,
            KeyEventKind::Release => false,
        };

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit = true,
            KeyCode::Char(' ') => {
                if key.kind == KeyEventKind::Press {
                    self.state.toggle_spin = !self.state.toggle_spin;
                }
            }
            KeyCode::Left if pressed => self.state.add_look(-ARROW_LOOK_STEP, 0.0),
            KeyCode::Right if pressed => self.state.add_look(ARROW_LOOK_STEP, 0.0),
            KeyCode::Up if pressed => self.state.add_look(0.0, -ARROW_LOOK_STEP),
            KeyCode::Down if pressed => self.state.add_look(0.0, ARROW_LOOK_STEP),
            KeyCode::Char(c) => {
                if let Some(held) = self.control(c.to_ascii_lowercase()) {
                    *held = pressed;
                }
            }
            _ => {}
        }
    }

    fn control(&mut self, c: char) -> Option<&mut bool> {
        let state = &mut self.state;
        Some(match c {
            'w' => &mut state.forward,
            's' => &mut state.back,
            'a' => &mut state.left,
            'd' => &mut state.right,
            'e' => &mut state.up,
            'q' => &mut state.down,
            'x' => &mut state.rotate_x,
            'y' => &mut state.rotate_y,
            'z' => &mut state.rotate_z,
            'j' => &mut state.scale_up,
            'k' => &mut state.scale_down,
            _ => return None,
        })
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let position = (mouse.column, mouse.row);
                if let Some((column, row)) = self.last_mouse {
                    let dx = (f64::from(position.0) - f64::from(column)) * LOOK_UNITS_PER_COLUMN;
                    let dy = (f64::from(position.1) - f64::from(row)) * LOOK_UNITS_PER_ROW;
                    self.state.add_look(dx, dy);
                }
                self.last_mouse = Some(position);
            }
            _ => {}
        }
    }
}
