//! CPU-side RGBA frame buffer that sprites are rasterised into
//!
//! The window renderer uploads this buffer each frame; headless runs save it
//! to disk instead.

use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec2;

use super::{Sprite, SpriteRenderer, Texture};

pub struct Canvas {
    width: u32,
    height: u32,
    /// RGBA pixel buffer (4 bytes per pixel), row 0 at the top
    buffer: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer: vec![0u8; (width * height * 4) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.buffer
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        Some([
            self.buffer[idx],
            self.buffer[idx + 1],
            self.buffer[idx + 2],
            self.buffer[idx + 3],
        ])
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.buffer,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )
        .with_context(|| format!("Failed to write frame to {}", path.display()))
    }

    #[inline]
    fn blend(&mut self, x: u32, y: u32, src: [u8; 4]) {
        let alpha = src[3] as u32;
        if alpha == 0 {
            return;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let dst = &mut self.buffer[idx..idx + 4];
        if alpha == 255 {
            dst.copy_from_slice(&src);
            return;
        }
        let inv = 255 - alpha;
        for c in 0..3 {
            dst[c] = ((src[c] as u32 * alpha + dst[c] as u32 * inv + 127) / 255) as u8;
        }
        dst[3] = (alpha + (dst[3] as u32 * inv + 127) / 255).min(255) as u8;
    }
}

impl SpriteRenderer for Canvas {
    fn clear(&mut self, color: [u8; 4]) {
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }

    /// Screen point = position + R(rotation) * (scale * (texel - origin)).
    /// Each covered pixel centre is mapped back into the texture and sampled
    /// nearest-neighbour.
    fn draw_sprite(&mut self, sprite: &Sprite, texture: &Texture) {
        if sprite.scale <= 0.0 || texture.width == 0 || texture.height == 0 {
            return;
        }

        let (sin, cos) = sprite.rotation.to_radians().sin_cos();
        let to_screen = |local: Vec2| {
            let d = (local - sprite.origin) * sprite.scale;
            sprite.position + Vec2::new(cos * d.x - sin * d.y, sin * d.x + cos * d.y)
        };

        let (tw, th) = (texture.width as f32, texture.height as f32);
        let corners = [
            to_screen(Vec2::ZERO),
            to_screen(Vec2::new(tw, 0.0)),
            to_screen(Vec2::new(0.0, th)),
            to_screen(Vec2::new(tw, th)),
        ];
        let min = corners.iter().fold(Vec2::splat(f32::MAX), |a, c| a.min(*c));
        let max = corners.iter().fold(Vec2::splat(f32::MIN), |a, c| a.max(*c));

        // Fully off-canvas (also catches NaN transforms)
        if !(max.x >= 0.0 && max.y >= 0.0 && min.x < self.width as f32 && min.y < self.height as f32)
        {
            return;
        }

        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil() as u32).min(self.width);
        let y1 = (max.y.ceil() as u32).min(self.height);

        let inv_scale = 1.0 / sprite.scale;
        for py in y0..y1 {
            for px in x0..x1 {
                let d = Vec2::new(px as f32 + 0.5, py as f32 + 0.5) - sprite.position;
                let local = Vec2::new(cos * d.x + sin * d.y, -sin * d.x + cos * d.y) * inv_scale
                    + sprite.origin;
                if local.x < 0.0 || local.y < 0.0 || local.x >= tw || local.y >= th {
                    continue;
                }
                let texel = texture.get_pixel(local.x as u32, local.y as u32);
                self.blend(px, py, texel);
            }
        }
    }
}
