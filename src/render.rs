use std::fmt;
use std::str::FromStr;

use crate::grid::Grid;
use crate::state::ALIVE;
use crate::state::DEAD;

/// Hex values of braille dots
///
/// ```notrust
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// One character per cell, `*` or a space
    #[default]
    Ascii,

    /// Each braille character covers a 2x4 block of cells
    Braille,
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(Style::Ascii),
            "braille" => Ok(Style::Braille),
            other => Err(format!("unknown style \"{other}\", expected ascii or braille")),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Style::Ascii => write!(f, "ascii"),
            Style::Braille => write!(f, "braille"),
        }
    }
}

/// Turns the cells of a [`Grid`] into text, one line per row of output.
///
/// The buffers are kept between frames so drawing a generation does not allocate.
pub struct Frame {
    style: Style,

    /// The frame buffer.
    fb: String,

    /// Braille codepoints, unused for [`Style::Ascii`]
    cp: Vec<u32>,
}

impl Frame {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            fb: String::new(),
            cp: Vec::new(),
        }
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Draw the current generation of `grid`. Every line, including the last, ends in `\n`.
    pub fn render(&mut self, grid: &Grid) -> &str {
        self.fb.clear();

        match self.style {
            Style::Ascii => self.render_ascii(grid),
            Style::Braille => self.render_braille(grid),
        }

        &self.fb
    }

    fn render_ascii(&mut self, grid: &Grid) {
        let (w, h) = (grid.width(), grid.height());
        self.fb.reserve((w + 1) * h);

        for y in 0..h {
            for x in 0..w {
                self.fb.push(if grid.is_alive(x, y) { ALIVE } else { DEAD });
            }
            self.fb.push('\n');
        }
    }

    fn render_braille(&mut self, grid: &Grid) {
        let (w, h) = (grid.width(), grid.height());

        // `bw` and `bh` are the width and height of the frame in braille characters
        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));

        self.cp.clear();
        self.cp.resize(bw * bh, BRAILLE_EMPTY);

        for y in 0..h {
            for x in 0..w {
                if grid.is_alive(x, y) {
                    self.cp[(y / 4) * bw + (x / 2)] += Self::get_hex_value(x, y);
                }
            }
        }

        // Each braille character is 3 bytes, and newlines one byte
        self.fb.reserve(3 * (bw * bh) + bh);

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            self.fb.push(char::from_u32(c).unwrap_or(DEAD));
        }
        self.fb.push('\n');
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}
