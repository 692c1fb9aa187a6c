/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Vector2;
use std::io::Write;
use trishade_core::{Rasterizer, ScreenVertex};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are about twice as tall as they are wide
pub const CELL_ASPECT: u32 = 2;

/// Fills triangles into a character grid, last one drawn wins
///
/// Triangles arrive in a square-pixel space `CELL_ASPECT` times taller than
/// the grid; rows are squeezed back when filling.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            char_buffer: vec![' '; width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.char_buffer = vec![' '; width * height];
    }

    /// Size of the pixel space triangles should be projected into
    pub fn screen_size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32 * CELL_ASPECT)
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.char_buffer[y * self.width + x])
        } else {
            None
        }
    }

    fn rasterize_triangle(&mut self, coords: [Vector2<f64>; 3], character: char) {
        let [v0, v1, v2] = coords;

        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i64;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i64;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i64;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i64;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i64 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vector2::new(x as f64 + 0.5, y as f64 + 0.5);

                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let idx = y as usize * self.width + x as usize;
                        self.char_buffer[idx] = character;
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                let color = ramp_color(c);
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(c))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Rasterizer for AsciiRenderer {
    fn fill_triangle(&mut self, vertices: &[ScreenVertex; 3]) {
        let cells =
            vertices.map(|v| Vector2::new(v.position.x, v.position.y / CELL_ASPECT as f64));
        self.rasterize_triangle(cells, shade_char(vertices[0].color));
    }
}

/// Ramp character for a flat RGBA colour
pub fn shade_char(color: [f32; 4]) -> char {
    let [r, g, b, _] = color;
    let luminance = (0.2126 * r + 0.7152 * g + 0.0722 * b).clamp(0.0, 1.0);
    let char_index = (luminance * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
    LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)]
}

/// Color based on character intensity
fn ramp_color(c: char) -> Color {
    match c {
        ' ' | '.' | ':' => Color::DarkGrey,
        '-' | '=' => Color::Grey,
        '+' | '*' => Color::White,
        '#' | '%' | '@' => Color::Cyan,
        _ => Color::White,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: Vector2<f64>,
    v1: Vector2<f64>,
    v2: Vector2<f64>,
    p: Vector2<f64>,
) -> Option<(f64, f64, f64)> {
    let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.y - v2.y) * (p.x - v2.x) + (v2.x - v1.x) * (p.y - v2.y)) / denom;
    let w1 = ((v2.y - v0.y) * (p.x - v2.x) + (v0.x - v2.x) * (p.y - v2.y)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f64, y: f64, level: f32) -> ScreenVertex {
        ScreenVertex {
            position: Vector2::new(x, y),
            color: [level, level, level, 1.0],
        }
    }

    #[test]
    fn test_screen_size_doubles_rows() {
        let renderer = AsciiRenderer::new(80, 24);
        assert_eq!(renderer.screen_size(), (80, 48));
    }

    #[test]
    fn test_fill_either_winding() {
        let mut renderer = AsciiRenderer::new(10, 10);
        let ccw = [
            vertex(0.0, 0.0, 1.0),
            vertex(10.0, 0.0, 1.0),
            vertex(0.0, 20.0, 1.0),
        ];
        renderer.fill_triangle(&ccw);
        assert_eq!(renderer.cell(1, 1), Some('@'));
        assert_eq!(renderer.cell(9, 9), Some(' '));

        renderer.clear();
        let cw = [ccw[0], ccw[2], ccw[1]];
        renderer.fill_triangle(&cw);
        assert_eq!(renderer.cell(1, 1), Some('@'));
    }

    #[test]
    fn test_later_triangles_paint_over() {
        let mut renderer = AsciiRenderer::new(4, 4);
        let big = |level| {
            [
                vertex(-10.0, -10.0, level),
                vertex(30.0, -10.0, level),
                vertex(-10.0, 40.0, level),
            ]
        };
        renderer.fill_triangle(&big(1.0));
        renderer.fill_triangle(&big(0.5));
        let half = shade_char([0.5, 0.5, 0.5, 1.0]);
        assert_ne!(half, '@');
        assert_eq!(renderer.cell(0, 0), Some(half));
        assert_eq!(renderer.cell(3, 3), Some(half));
    }

    #[test]
    fn test_offscreen_triangle_is_clipped() {
        let mut renderer = AsciiRenderer::new(4, 4);
        renderer.fill_triangle(&[
            vertex(100.0, 100.0, 1.0),
            vertex(200.0, 100.0, 1.0),
            vertex(100.0, 200.0, 1.0),
        ]);
        assert!((0..4).all(|y| (0..4).all(|x| renderer.cell(x, y) == Some(' '))));
    }

    #[test]
    fn test_degenerate_triangle_draws_nothing() {
        let mut renderer = AsciiRenderer::new(4, 4);
        renderer.fill_triangle(&[
            vertex(0.0, 0.0, 1.0),
            vertex(0.0, 0.0, 1.0),
            vertex(0.0, 0.0, 1.0),
        ]);
        assert_eq!(renderer.cell(0, 0), Some(' '));
    }

    #[test]
    fn test_shade_ramp_ends() {
        assert_eq!(shade_char([0.0, 0.0, 0.0, 1.0]), ' ');
        assert_eq!(shade_char([1.0, 1.0, 1.0, 1.0]), '@');
        assert_eq!(shade_char([2.0, 2.0, 2.0, 1.0]), '@');
    }

    #[test]
    fn test_draw_emits_every_row() {
        let mut renderer = AsciiRenderer::new(3, 2);
        renderer.fill_triangle(&[
            vertex(-5.0, -5.0, 1.0),
            vertex(20.0, -5.0, 1.0),
            vertex(-5.0, 20.0, 1.0),
        ]);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.matches('@').count() >= 3);
    }
}
