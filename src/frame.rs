//! Square framing for rendered assets
//!
//! Every asset thumbnail occupies a square, whatever strategy produced it. The
//! frame pairs the content with a transparent 1x1 reference image: the box is
//! sized from the reference, and the content is layered inside it.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

use crate::render::RenderSpec;

/// Transparent 1x1 PNG used as the frame's size reference
pub const REFERENCE_PIXEL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR4nGNiYAAAAAkAAxkR2eQAAAAASUVORK5CYII=";

/// Base class applied to every frame
pub const FRAME_CLASS: &str = "AssetImage";

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("reference image is not a base64 data URI")]
    NotDataUri,
    #[error("failed to decode reference image: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("failed to read reference image: {0}")]
    Image(#[from] image::ImageError),
}

/// Decoded pixel size of [`REFERENCE_PIXEL`].
pub fn reference_size() -> Result<(u32, u32), FrameError> {
    let payload = REFERENCE_PIXEL
        .split_once(";base64,")
        .map(|(_, data)| data)
        .ok_or(FrameError::NotDataUri)?;
    let bytes = STANDARD.decode(payload)?;
    let img = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)?.to_rgba8();
    Ok(img.dimensions())
}

/// A render result wrapped in a square box.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareFrame {
    content: RenderSpec,
    class_name: Option<String>,
}

impl SquareFrame {
    pub fn new(content: RenderSpec) -> Self {
        Self { content, class_name: None }
    }

    /// Add a caller class next to the base frame class.
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        let class_name = class_name.into();
        self.class_name = (!class_name.trim().is_empty()).then_some(class_name);
        self
    }

    pub fn content(&self) -> &RenderSpec {
        &self.content
    }

    pub fn into_content(self) -> RenderSpec {
        self.content
    }

    pub fn class_names(&self) -> String {
        match &self.class_name {
            Some(extra) => format!("{} {}", FRAME_CLASS, extra),
            None => FRAME_CLASS.to_string(),
        }
    }

    /// Box size for a given available width: the reference scaled to fit.
    pub fn bounds(&self, available_width: u32) -> Result<(u32, u32), FrameError> {
        let (ref_w, ref_h) = reference_size()?;
        let height = (available_width as u64 * ref_h as u64 / ref_w.max(1) as u64) as u32;
        Ok((available_width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Asset, DisplayOptions};
    use crate::render::render;
    use crate::resolve::DefaultResolver;

    fn spec() -> RenderSpec {
        render(&Asset::ens("alexa"), &DisplayOptions::default(), &DefaultResolver).unwrap()
    }

    #[test]
    fn test_reference_pixel_is_one_by_one() {
        assert_eq!(reference_size().unwrap(), (1, 1));
    }

    #[test]
    fn test_bounds_are_square() {
        let frame = SquareFrame::new(spec());
        for width in [0, 1, 64, 320, 1080] {
            let (w, h) = frame.bounds(width).unwrap();
            assert_eq!(w, h);
            assert_eq!(w, width);
        }
    }

    #[test]
    fn test_class_names() {
        assert_eq!(SquareFrame::new(spec()).class_names(), "AssetImage");
        assert_eq!(SquareFrame::new(spec()).with_class("card").class_names(), "AssetImage card");
        assert_eq!(SquareFrame::new(spec()).with_class("").class_names(), "AssetImage");
    }

    #[test]
    fn test_frame_keeps_content() {
        let frame = SquareFrame::new(spec());
        assert_eq!(frame.content().kind(), "ens");
        assert_eq!(frame.into_content(), spec());
    }
}
