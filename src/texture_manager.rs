use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use image::RgbImage;

use crate::canvas::Canvas;

/// Convert the canvas bitmap into an egui image
pub fn to_color_image(image: &RgbImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    ColorImage::from_rgb(size, image.as_raw())
}

/// Keeps the canvas uploaded to the GPU, re-uploading only when its pixels change
#[derive(Default)]
pub struct CanvasTexture {
    /// Uploaded texture and the canvas revision it was built from
    cached: Option<(u64, TextureHandle)>,
}

impl CanvasTexture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture for the current canvas contents
    pub fn texture_id(&mut self, ctx: &Context, canvas: &Canvas) -> TextureId {
        let revision = canvas.revision();

        match &mut self.cached {
            Some((cached_revision, handle)) => {
                if *cached_revision != revision {
                    handle.set(to_color_image(canvas.image()), TextureOptions::NEAREST);
                    *cached_revision = revision;
                }
                handle.id()
            }
            None => {
                let handle = ctx.load_texture(
                    "canvas",
                    to_color_image(canvas.image()),
                    TextureOptions::NEAREST,
                );
                let id = handle.id();
                self.cached = Some((revision, handle));
                id
            }
        }
    }

    /// Revision of the canvas last uploaded, if any
    #[cfg(test)]
    fn uploaded_revision(&self) -> Option<u64> {
        self.cached.as_ref().map(|(revision, _)| *revision)
    }
}
