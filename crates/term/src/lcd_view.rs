//! LcdView: maps the bus dot image into a terminal grid.
//!
//! Two dot rows share one terminal row through half-block characters, so the
//! 64x64 panel takes 64 columns by 32 rows and stays roughly square. This
//! module is pure (no I/O).

use tinyboy_display::BusScreen;

use crate::grid::{Cell, CellStyle, Rgb, TextGrid};
use crate::types::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PANEL_W: u16 = DISPLAY_WIDTH as u16;
const PANEL_H: u16 = (DISPLAY_HEIGHT / 2) as u16;

fn half_block(top: bool, bottom: bool) -> char {
    match (top, bottom) {
        (true, true) => '█',
        (true, false) => '▀',
        (false, true) => '▄',
        (false, false) => ' ',
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LcdView {
    panel: CellStyle,
    bezel: CellStyle,
    text: CellStyle,
}

impl Default for LcdView {
    fn default() -> Self {
        Self {
            // Green-on-olive, like an unlit reflective panel.
            panel: CellStyle::new(Rgb::new(15, 56, 15), Rgb::new(155, 188, 15)),
            bezel: CellStyle::new(Rgb::new(120, 120, 130), Rgb::new(0, 0, 0)),
            text: CellStyle::new(Rgb::new(160, 160, 160), Rgb::new(0, 0, 0)),
        }
    }
}

impl LcdView {
    /// Draw `screen` centred in `viewport`, with `status` on the line below.
    pub fn render_into(
        &self,
        screen: &BusScreen,
        status: &str,
        viewport: Viewport,
        grid: &mut TextGrid,
    ) {
        grid.resize(viewport.width, viewport.height);
        grid.fill(Cell::default());

        let frame_w = PANEL_W + 2;
        let frame_h = PANEL_H + 2;
        let x0 = viewport.width.saturating_sub(frame_w) / 2;
        let y0 = viewport.height.saturating_sub(frame_h + 1) / 2;

        self.draw_bezel(grid, x0, y0, frame_w, frame_h);

        for row in 0..PANEL_H {
            for col in 0..PANEL_W {
                let (dx, dy) = (usize::from(col), usize::from(row) * 2);
                let ch = half_block(screen.dot(dx, dy), screen.dot(dx, dy + 1));
                grid.set(
                    x0 + 1 + col,
                    y0 + 1 + row,
                    Cell {
                        ch,
                        style: self.panel,
                    },
                );
            }
        }

        grid.put_str(x0, y0 + frame_h, status, self.text);
    }

    pub fn render(&self, screen: &BusScreen, status: &str, viewport: Viewport) -> TextGrid {
        let mut grid = TextGrid::new(viewport.width, viewport.height);
        self.render_into(screen, status, viewport, &mut grid);
        grid
    }

    fn draw_bezel(&self, grid: &mut TextGrid, x: u16, y: u16, w: u16, h: u16) {
        let style = self.bezel;
        let right = x + w - 1;
        let bottom = y + h - 1;
        for cx in x..=right {
            grid.set(cx, y, Cell { ch: '─', style });
            grid.set(cx, bottom, Cell { ch: '─', style });
        }
        for cy in y..=bottom {
            grid.set(x, cy, Cell { ch: '│', style });
            grid.set(right, cy, Cell { ch: '│', style });
        }
        grid.set(x, y, Cell { ch: '┌', style });
        grid.set(right, y, Cell { ch: '┐', style });
        grid.set(x, bottom, Cell { ch: '└', style });
        grid.set(right, bottom, Cell { ch: '┘', style });
    }
}
