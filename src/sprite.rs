//! Sprite decoding and terminal rendering
//!
//! Sprites arrive as PNG bytes and are rendered with half-block cells, one
//! text row per two pixel rows.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const ALPHA_CUTOFF: u8 = 128;

/// A decoded RGBA sprite.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA bytes, `width * height * 4` long.
    pub rgba: Vec<u8>,
}

impl SpriteImage {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        let offset = ((y * self.width + x) * 4) as usize;
        [
            self.rgba[offset],
            self.rgba[offset + 1],
            self.rgba[offset + 2],
            self.rgba[offset + 3],
        ]
    }

    fn opaque(&self, x: u32, y: u32) -> Option<Color> {
        let [r, g, b, a] = self.pixel(x, y);
        (a >= ALPHA_CUTOFF).then_some(Color::Rgb(r, g, b))
    }

    /// Bounding box of non-transparent pixels: (x, y, width, height).
    fn content_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.pixel(x, y)[3] >= ALPHA_CUTOFF {
                    bounds = Some(match bounds {
                        None => (x, y, x, y),
                        Some((min_x, min_y, max_x, max_y)) => {
                            (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                        }
                    });
                }
            }
        }
        bounds.map(|(min_x, min_y, max_x, max_y)| {
            (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
        })
    }
}

pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteImage, String> {
    let image = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let rgba = image.to_rgba8();
    Ok(SpriteImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

/// Render a sprite into at most `max_cols` x `max_rows` text cells.
/// Transparent margins are cropped first; the sprite is downscaled by an
/// integer factor when it does not fit.
pub fn sprite_lines(sprite: &SpriteImage, max_cols: u16, max_rows: u16) -> Vec<Line<'static>> {
    if max_cols == 0 || max_rows == 0 {
        return Vec::new();
    }
    let Some((left, top, width, height)) = sprite.content_bounds() else {
        return Vec::new();
    };

    let max_px_w = max_cols as u32;
    let max_px_h = max_rows as u32 * 2;
    let scale = width
        .div_ceil(max_px_w)
        .max(height.div_ceil(max_px_h))
        .max(1);
    let cols = width.div_ceil(scale);
    let rows = height.div_ceil(scale * 2);

    let sample = |cx: u32, py: u32| -> Option<Color> {
        let sx = left + (cx * scale + scale / 2).min(width - 1);
        let sy = top + (py * scale + scale / 2).min(height - 1);
        sprite.opaque(sx, sy)
    };

    let mut lines = Vec::with_capacity(rows as usize);
    for row in 0..rows {
        let mut spans = Vec::with_capacity(cols as usize);
        for col in 0..cols {
            let upper = sample(col, row * 2);
            let lower = sample(col, row * 2 + 1);
            let span = match (upper, lower) {
                (Some(up), Some(down)) => {
                    Span::styled("\u{2580}", Style::default().fg(up).bg(down))
                }
                (Some(up), None) => Span::styled("\u{2580}", Style::default().fg(up)),
                (None, Some(down)) => Span::styled("\u{2584}", Style::default().fg(down)),
                (None, None) => Span::raw(" "),
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }
    lines
}
