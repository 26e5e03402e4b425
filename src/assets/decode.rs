use crate::assets::{FrameImage, source::FrameLoadError};

/// Decode an encoded frame (WebP, PNG, JPEG, ...) into straight-alpha RGBA8.
pub fn decode_frame(bytes: &[u8]) -> Result<FrameImage, FrameLoadError> {
    let dyn_img =
        image::load_from_memory(bytes).map_err(|e| FrameLoadError::Decode(e.to_string()))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(FrameLoadError::Empty);
    }

    Ok(FrameImage::new(width, height, rgba.into_raw()))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
