//! Colour palette and text rendering.
//!
//! The engine knows nothing about display; these helpers turn a grid into what a
//! viewer needs, either colours for the browser client or glyphs for a terminal.

use serde::Serialize;

use crate::sim::grid::Grid;
use crate::sim::types::Material;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const EMPTY_COLOR: Rgb = Rgb::new(0, 0, 0);
pub const METAL_COLOR: Rgb = Rgb::new(128, 128, 128);
pub const SAND_COLOR: Rgb = Rgb::new(255, 255, 0);
pub const WATER_COLOR: Rgb = Rgb::new(0, 0, 255);
pub const OIL_COLOR: Rgb = Rgb::new(255, 200, 0);
pub const ACID_COLOR: Rgb = Rgb::new(0, 252, 16);
pub const MAGMA_COLOR: Rgb = Rgb::new(255, 0, 0);

pub fn color_of(material: Material) -> Rgb {
    match material {
        Material::Empty => EMPTY_COLOR,
        Material::Metal => METAL_COLOR,
        Material::Sand => SAND_COLOR,
        Material::Water => WATER_COLOR,
        Material::Oil => OIL_COLOR,
        Material::Acid => ACID_COLOR,
        Material::Magma => MAGMA_COLOR,
    }
}

pub fn glyph_of(material: Material) -> char {
    match material {
        Material::Empty => ' ',
        Material::Metal => '#',
        Material::Sand => '.',
        Material::Water => '~',
        Material::Oil => 'o',
        Material::Acid => 'a',
        Material::Magma => '^',
    }
}

/// One tool as shown to a client: wire code, name and colour.
#[derive(Debug, Clone, Serialize)]
pub struct PaletteEntry {
    pub code: u8,
    pub tool: &'static str,
    pub color: Rgb,
}

pub fn palette() -> Vec<PaletteEntry> {
    Material::ALL
        .into_iter()
        .map(|material| PaletteEntry {
            code: material.code(),
            tool: material.tool_name(),
            color: color_of(material),
        })
        .collect()
}

/// Render the grid as text, one line per row.
pub fn render_text(grid: &Grid) -> String {
    let (rows, cols) = grid.dimensions();
    let mut out = String::with_capacity(rows as usize * (cols as usize + 1));
    for row in grid.rows() {
        out.extend(row.iter().map(|&m| glyph_of(m)));
        out.push('\n');
    }
    out
}

/// Print the grid framed by a border, for the terminal demo.
pub fn print_grid(grid: &Grid, generation: u64) {
    let (_, cols) = grid.dimensions();
    let border = format!("+{}+", "-".repeat(cols as usize));
    println!("--- generation {} ---", generation);
    println!("{}", border);
    for line in render_text(grid).lines() {
        println!("|{}|", line);
    }
    println!("{}", border);
}
