//! Camera offset/zoom and the two coordinate mappings built on it.

use glam::Vec2;

use crate::config::CameraConfig;

/// View offset (metres) and zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    zoom: f32,
}

impl Camera {
    pub fn new(position: Vec2, zoom: f32) -> Self {
        Self { position, zoom }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(
            Vec2::new(config.start_x, config.start_y),
            config.start_zoom.clamp(config.min_zoom, config.max_zoom),
        )
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Move the view by `delta` metres.
    pub fn pan(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Add `delta` to the zoom, clamped to `[min_zoom, max_zoom]`.
    ///
    /// Repeated zoom-out presses stop at `min_zoom`, which config validation
    /// keeps positive, so the screen mapping never divides by zero.
    pub fn zoom_by(&mut self, delta: f32, min_zoom: f32, max_zoom: f32) {
        self.zoom = (self.zoom + delta).clamp(min_zoom, max_zoom);
    }

    /// Map a cursor position to world *pixels* (not metres).
    ///
    /// The factories divide the result by `scale` again, so a click lands
    /// where the render mapping puts it back on screen.
    pub fn screen_to_world_pixels(&self, screen: Vec2, scale: f32) -> Vec2 {
        screen / self.zoom + self.position * scale
    }

    /// Map a body position in metres to the screen.
    pub fn world_to_screen(&self, world: Vec2, scale: f32) -> Vec2 {
        (scale * self.zoom) * (world - self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a - b).length() < 1e-3, "{a:?} != {b:?}");
    }

    #[test]
    fn test_from_config_defaults() {
        let camera = Camera::from_config(&CameraConfig::default());
        assert_eq!(camera.position, Vec2::new(0.0, 6.5));
        assert_eq!(camera.zoom(), 1.0);
    }

    #[test]
    fn test_world_to_screen_matches_ground_placement() {
        let camera = Camera::new(Vec2::new(0.0, 6.5), 1.0);
        let ground = Vec2::new(340.0, 500.0) / 30.0;
        assert_close(camera.world_to_screen(ground, 30.0), Vec2::new(340.0, 305.0));
    }

    #[test]
    fn test_screen_world_round_trip() {
        let scale = 30.0;
        for &(zoom, offset) in &[
            (1.0, Vec2::new(0.0, 6.5)),
            (0.3, Vec2::new(-4.0, 2.0)),
            (2.7, Vec2::new(12.5, -3.0)),
        ] {
            let camera = Camera::new(offset, zoom);
            for &screen in &[Vec2::ZERO, Vec2::new(320.0, 180.0), Vec2::new(639.0, 12.0)] {
                let world_px = camera.screen_to_world_pixels(screen, scale);
                let back = camera.world_to_screen(world_px / scale, scale);
                assert_close(back, screen);
            }
        }
    }

    #[test]
    fn test_zoom_never_reaches_zero() {
        let mut camera = Camera::new(Vec2::ZERO, 1.0);
        for _ in 0..50 {
            camera.zoom_by(-0.1, 0.1, 10.0);
        }
        assert_eq!(camera.zoom(), 0.1);
        assert!(camera.screen_to_world_pixels(Vec2::ONE, 30.0).is_finite());
    }

    #[test]
    fn test_zoom_upper_bound() {
        let mut camera = Camera::new(Vec2::ZERO, 9.95);
        camera.zoom_by(0.1, 0.1, 10.0);
        assert_eq!(camera.zoom(), 10.0);
    }

    #[test]
    fn test_pan() {
        let mut camera = Camera::new(Vec2::new(0.0, 6.5), 1.0);
        camera.pan(Vec2::new(0.0, -1.0));
        camera.pan(Vec2::new(1.0, 0.0));
        assert_eq!(camera.position, Vec2::new(1.0, 5.5));
    }
}
