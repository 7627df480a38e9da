use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use tracing::warn;
use winit::window::Window;

use super::FrameBuffer;

/// Owns the GPU surface on the window thread and uploads finished frames.
pub struct Presenter {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    buffer_width: u32,
    buffer_height: u32,
    warned_size_mismatch: bool,
}

impl Presenter {
    pub fn new(window: Arc<Window>, buffer_width: u32, buffer_height: u32) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(
            Arc::clone(&window),
            size.width,
            size.height,
            buffer_width,
            buffer_height,
        )?;
        Ok(Self {
            window,
            pixels,
            buffer_width,
            buffer_height,
            warned_size_mismatch: false,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(
            Arc::clone(&self.window),
            width,
            height,
            self.buffer_width,
            self.buffer_height,
        )?;
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        surface_width: u32,
        surface_height: u32,
        buffer_width: u32,
        buffer_height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(surface_width, surface_height, window);
        Pixels::new(buffer_width, buffer_height, surface)
    }

    pub fn present(&mut self, frame: &FrameBuffer) -> Result<(), Error> {
        if !frame.copy_into(self.pixels.frame_mut()) && !self.warned_size_mismatch {
            self.warned_size_mismatch = true;
            warn!(
                frame_width = frame.width(),
                frame_height = frame.height(),
                buffer_width = self.buffer_width,
                buffer_height = self.buffer_height,
                "frame_size_mismatch"
            );
        }
        self.pixels.render()
    }
}
