//! Sprite images and their load-failure fallback

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::AssetConfig;
use crate::physics::BodyKind;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Raw RGBA pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Texture {
    /// Decode a PNG (or any format `image` was built with) from memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self {
            width: img.width(),
            height: img.height(),
            data: img.into_raw(),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        let data = color
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Generated stand-in with the nominal sprite size for `kind`.
    pub fn placeholder(kind: BodyKind) -> Self {
        match kind {
            BodyKind::Ground => {
                let mut texture = Self::solid(480, 32, [96, 72, 48, 255]);
                for x in 0..texture.width {
                    for y in 0..4 {
                        texture.put(x, y, [72, 140, 60, 255]);
                    }
                }
                texture
            }
            BodyKind::Box => {
                let mut texture = Self::solid(32, 32, [214, 150, 64, 255]);
                for i in 0..32 {
                    for edge in [0, 1, 30, 31] {
                        texture.put(i, edge, [120, 80, 30, 255]);
                        texture.put(edge, i, [120, 80, 30, 255]);
                    }
                }
                texture
            }
            BodyKind::Circle => {
                let mut texture = Self::solid(32, 32, [0, 0, 0, 0]);
                for y in 0..32 {
                    for x in 0..32 {
                        let dx = x as f32 + 0.5 - 16.0;
                        let dy = y as f32 + 0.5 - 16.0;
                        if dx * dx + dy * dy <= 16.0 * 16.0 {
                            texture.put(x, y, [80, 140, 220, 255]);
                        }
                    }
                }
                // Spoke so rotation is visible
                for x in 16..30 {
                    texture.put(x, 15, [30, 60, 120, 255]);
                    texture.put(x, 16, [30, 60, 120, 255]);
                }
                texture
            }
        }
    }

    /// Get a pixel (returns RGBA); out-of-range reads are transparent
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    fn put(&mut self, x: u32, y: u32, color: [u8; 4]) {
        let idx = ((y * self.width + x) * 4) as usize;
        self.data[idx..idx + 4].copy_from_slice(&color);
    }
}

/// One texture per body kind
#[derive(Debug, Clone)]
pub struct TextureSet {
    pub ground: Texture,
    pub box_: Texture,
    pub circle: Texture,
}

impl TextureSet {
    /// Load all three sprites. A missing or broken file is logged and
    /// replaced with a placeholder so the demo keeps running.
    pub fn load(assets: &AssetConfig) -> Self {
        Self {
            ground: load_or_placeholder(&assets.ground_path(), BodyKind::Ground),
            box_: load_or_placeholder(&assets.box_path(), BodyKind::Box),
            circle: load_or_placeholder(&assets.circle_path(), BodyKind::Circle),
        }
    }

    pub fn placeholders() -> Self {
        Self {
            ground: Texture::placeholder(BodyKind::Ground),
            box_: Texture::placeholder(BodyKind::Box),
            circle: Texture::placeholder(BodyKind::Circle),
        }
    }

    pub fn get(&self, kind: BodyKind) -> &Texture {
        match kind {
            BodyKind::Ground => &self.ground,
            BodyKind::Box => &self.box_,
            BodyKind::Circle => &self.circle,
        }
    }
}

fn load_or_placeholder(path: &Path, kind: BodyKind) -> Texture {
    match Texture::load(path) {
        Ok(texture) => {
            log::info!(
                "Loaded {:?} sprite from {} ({}x{})",
                kind,
                path.display(),
                texture.width,
                texture.height
            );
            texture
        }
        Err(e) => {
            log::error!("{e}; using generated {:?} placeholder", kind);
            Texture::placeholder(kind)
        }
    }
}
