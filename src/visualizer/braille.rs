use ratatui::prelude::*;

use crate::color::Element;

/// Braille dot positions within a 2x4 cell:
/// (0,0)=0x01 (1,0)=0x08
/// (0,1)=0x02 (1,1)=0x10
/// (0,2)=0x04 (1,2)=0x20
/// (0,3)=0x40 (1,3)=0x80
pub const DOT_MAP: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40],
    [0x08, 0x10, 0x20, 0x80],
];

/// Stacking order when several elements share one character cell; the cell
/// takes the colour of the highest.
fn z_order(element: Element) -> u8 {
    match element {
        Element::NightShadow => 0,
        Element::Orbit => 1,
        Element::OmniRange => 2,
        Element::StableOrbit => 3,
        Element::BrokenLink => 4,
        Element::Link => 5,
        Element::Satellite => 6,
        Element::Atmosphere => 7,
        Element::Body => 8,
        Element::Text => 9,
    }
}

/// A canvas for sub-character braille rendering.
/// Each terminal character cell maps to a 2x4 grid of braille dots, and every
/// dot remembers which element painted it last.
pub struct BrailleCanvas {
    pub grid: Vec<Option<Element>>,
    pub grid_w: usize,
    pub grid_h: usize,
    char_w: usize,
    char_h: usize,
}

impl BrailleCanvas {
    /// Create a new braille canvas for the given character dimensions.
    pub fn new(char_w: usize, char_h: usize) -> Self {
        let grid_w = char_w * 2;
        let grid_h = char_h * 4;
        Self {
            grid: vec![None; grid_w * grid_h],
            grid_w,
            grid_h,
            char_w,
            char_h,
        }
    }

    /// Set a single dot on the braille grid (bounds-checked).
    #[inline]
    pub fn set(&mut self, gx: isize, gy: isize, element: Element) {
        if gx >= 0 && gy >= 0 && (gx as usize) < self.grid_w && (gy as usize) < self.grid_h {
            self.grid[gy as usize * self.grid_w + gx as usize] = Some(element);
        }
    }

    #[inline]
    pub fn get(&self, gx: usize, gy: usize) -> Option<Element> {
        if gx < self.grid_w && gy < self.grid_h {
            self.grid[gy * self.grid_w + gx]
        } else {
            None
        }
    }

    /// Draw a line using Bresenham's algorithm.
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), element: Element) {
        bresenham_line(
            &mut self.grid,
            self.grid_w,
            self.grid_h,
            (from.0.round() as isize, from.1.round() as isize),
            (to.0.round() as isize, to.1.round() as isize),
            element,
        );
    }

    /// Outline of a circle. With `dash` set, alternate runs of that many dots
    /// are left out.
    pub fn circle(&mut self, center: (f64, f64), radius: f64, element: Element, dash: Option<usize>) {
        if !(radius > 0.0) {
            return;
        }
        // one sample per dot of circumference keeps the outline gap-free
        let samples = ((std::f64::consts::TAU * radius).ceil() as usize).max(8);
        for i in 0..samples {
            if let Some(dash) = dash {
                if (i / dash.max(1)) % 2 == 1 {
                    continue;
                }
            }
            let angle = std::f64::consts::TAU * i as f64 / samples as f64;
            let (sin, cos) = angle.sin_cos();
            self.set(
                (center.0 + cos * radius).round() as isize,
                (center.1 + sin * radius).round() as isize,
                element,
            );
        }
    }

    /// Paint every dot for which `inside(gx, gy)` holds.
    pub fn fill(&mut self, element: Element, inside: impl Fn(usize, usize) -> bool) {
        for gy in 0..self.grid_h {
            for gx in 0..self.grid_w {
                if inside(gx, gy) {
                    self.grid[gy * self.grid_w + gx] = Some(element);
                }
            }
        }
    }

    /// Encode braille grid to characters and write to the frame buffer.
    /// `color_fn(element)` returns the RGB colour for a cell whose top-most
    /// element is `element`.
    pub fn render(&self, frame: &mut Frame, area: Rect, color_fn: impl Fn(Element) -> (u8, u8, u8)) {
        for cy in 0..self.char_h {
            for cx in 0..self.char_w {
                let mut braille: u8 = 0;
                let mut top: Option<Element> = None;

                for (dx, col) in DOT_MAP.iter().enumerate() {
                    for (dy, &bit) in col.iter().enumerate() {
                        if let Some(element) = self.get(cx * 2 + dx, cy * 4 + dy) {
                            braille |= bit;
                            if top.map_or(true, |t| z_order(element) > z_order(t)) {
                                top = Some(element);
                            }
                        }
                    }
                }

                if let Some(element) = top {
                    let (r, g, b) = color_fn(element);
                    let ch = char::from_u32(0x2800 + braille as u32).unwrap_or(' ');
                    let cell = frame
                        .buffer_mut()
                        .cell_mut((area.x + cx as u16, area.y + cy as u16));
                    if let Some(cell) = cell {
                        cell.set_char(ch);
                        cell.set_fg(Color::Rgb(r, g, b));
                    }
                }
            }
        }
    }
}

/// Draw a line on a dot grid using Bresenham's algorithm. Endpoints may lie
/// off the grid; only the visible part is painted.
pub fn bresenham_line(
    grid: &mut [Option<Element>],
    grid_w: usize,
    grid_h: usize,
    from: (isize, isize),
    to: (isize, isize),
    element: Element,
) {
    let (mut x0, mut y0) = from;
    let (x1, y1) = to;

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx: isize = if x0 < x1 { 1 } else { -1 };
    let sy: isize = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x0 >= 0 && x0 < grid_w as isize && y0 >= 0 && y0 < grid_h as isize {
            grid[y0 as usize * grid_w + x0 as usize] = Some(element);
        }

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
