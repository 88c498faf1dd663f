//! Extruded 3D text built from a 5x7 block glyph font.
//!
//! Each lit cell of a glyph becomes a small extruded box, so the result is
//! ordinary mesh data that renders through the normal mesh pipeline.

use glam::Vec3;

use crate::renderer::mesh::{MeshBuilder, MeshData};

/// Layout options for [`build_text`].
#[derive(Debug, Clone, Copy)]
pub struct TextOptions {
    /// Glyph height in world units.
    pub size: f32,
    /// Extrusion depth along Z.
    pub depth: f32,
    /// Extra horizontal gap between glyphs, in cells.
    pub letter_spacing: f32,
    /// Center the text block on the origin.
    pub centered: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            size: 0.5,
            depth: 0.2,
            letter_spacing: 0.0,
            centered: true,
        }
    }
}

const GLYPH_ROWS: usize = 7;
const GLYPH_COLS: f32 = 5.0;

/// 5x7 bitmap for a supported character, rows top to bottom, bit 4 the
/// leftmost column. Unsupported characters render as spaces.
fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        _ => return None,
    };
    Some(rows)
}

/// Horizontal advance per character, in cells.
fn advance_cells(opts: &TextOptions) -> f32 {
    GLYPH_COLS + 1.0 + opts.letter_spacing
}

/// Total width and height of the laid-out text, in world units.
pub fn measure(text: &str, opts: &TextOptions) -> (f32, f32) {
    let cell = opts.size / GLYPH_ROWS as f32;
    let n = text.chars().count() as f32;
    if n == 0.0 {
        return (0.0, 0.0);
    }
    // No trailing gap after the last glyph.
    let width = (n * advance_cells(opts) - 1.0 - opts.letter_spacing) * cell;
    (width, opts.size)
}

/// Lay out `text` as extruded block glyphs.
pub fn build_text(text: &str, opts: &TextOptions) -> MeshData {
    let cell = opts.size / GLYPH_ROWS as f32;
    let (width, height) = measure(text, opts);
    let (origin_x, origin_y) = if opts.centered {
        (-width / 2.0, -height / 2.0)
    } else {
        (0.0, 0.0)
    };

    let mut builder = MeshBuilder::new();
    let mut pen_x = origin_x;

    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..5 {
                    if bits & (1 << (4 - col)) == 0 {
                        continue;
                    }
                    let center = Vec3::new(
                        pen_x + (col as f32 + 0.5) * cell,
                        origin_y + ((GLYPH_ROWS - 1 - row) as f32 + 0.5) * cell,
                        0.0,
                    );
                    builder.add_box_at(center, cell, cell, opts.depth);
                }
            }
        }
        pen_x += advance_cells(opts) * cell;
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells_of(c: char) -> u32 {
        glyph(c)
            .map(|rows| rows.iter().map(|r| r.count_ones()).sum())
            .unwrap_or(0)
    }

    #[test]
    fn one_box_per_lit_cell() {
        let opts = TextOptions::default();
        let mesh = build_text("A", &opts);
        assert_eq!(mesh.vertex_count(), cells_of('A') * 36);
    }

    #[test]
    fn unknown_chars_advance_but_add_nothing() {
        let opts = TextOptions::default();
        let with_space = build_text("A A", &opts);
        let pair = build_text("AA", &opts);
        assert_eq!(with_space.vertex_count(), pair.vertex_count());

        let (w_space, _) = measure("A A", &opts);
        let (w_pair, _) = measure("AA", &opts);
        assert!(w_space > w_pair);
    }

    #[test]
    fn centered_text_straddles_the_origin() {
        let opts = TextOptions::default();
        let mesh = build_text("VELA", &opts);

        let (min_x, max_x) = mesh.vertices.iter().fold((f32::MAX, f32::MIN), |(lo, hi), v| {
            (lo.min(v.position[0]), hi.max(v.position[0]))
        });
        assert!((min_x + max_x).abs() < 1e-3, "min {min_x} max {max_x}");

        let (min_y, max_y) = mesh.vertices.iter().fold((f32::MAX, f32::MIN), |(lo, hi), v| {
            (lo.min(v.position[1]), hi.max(v.position[1]))
        });
        assert!((min_y + max_y).abs() < 1e-3);
    }

    #[test]
    fn measure_matches_geometry() {
        let opts = TextOptions {
            centered: false,
            ..Default::default()
        };
        // H is lit in its outermost columns, so the geometry reaches the
        // measured bounds exactly.
        let mesh = build_text("HH", &opts);
        let (width, _) = measure("HH", &opts);

        let max_x = mesh
            .vertices
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        assert!((max_x - width).abs() < 1e-3, "max_x {max_x} width {width}");
    }

    #[test]
    fn lowercase_maps_to_uppercase() {
        let opts = TextOptions::default();
        assert_eq!(
            build_text("vela", &opts).vertex_count(),
            build_text("VELA", &opts).vertex_count()
        );
    }

    #[test]
    fn empty_text_is_empty() {
        let mesh = build_text("", &TextOptions::default());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(measure("", &TextOptions::default()), (0.0, 0.0));
    }
}
