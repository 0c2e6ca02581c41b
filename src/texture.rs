//! Image decoding and texture upload for slide media.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;

/// Load a slide image as a GPU texture, honoring the EXIF orientation
/// phone-camera JPEGs carry (3 = 180, 6 = 90 CW, 8 = 90 CCW; mirrored
/// variants are left alone).
pub fn load_slide_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    path: &Path,
) -> Result<Texture2D> {
    let bytes = fs::read(path).with_context(|| format!("reading image {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &bytes)
        .map_err(|e| anyhow!("decoding image {}: {}", path.display(), e))?;

    // EXIF is only read where it is reliable.
    if extension == "jpg" || extension == "jpeg" {
        match exif_orientation(&bytes) {
            3 => {
                image.rotate_cw();
                image.rotate_cw();
            }
            6 => image.rotate_cw(),
            8 => image.rotate_ccw(),
            _ => {}
        }
    }

    rl.load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("uploading texture for {}: {}", path.display(), e))
}

/// Solid-color texture used as the first frame of a video stream.
pub fn blank_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    width: i32,
    height: i32,
) -> Result<Texture2D> {
    let image = Image::gen_image_color(width, height, Color::BLACK);
    rl.load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("creating {width}x{height} texture: {e}"))
}

fn exif_orientation(bytes: &[u8]) -> u16 {
    let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(_) => return 1,
    };
    match exif.get_field(Tag::Orientation, In::PRIMARY) {
        Some(field) => match &field.value {
            Value::Short(values) => values.first().copied().unwrap_or(1),
            _ => 1,
        },
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_exif_defaults_to_upright() {
        assert_eq!(exif_orientation(&[]), 1);
        assert_eq!(exif_orientation(b"not a jpeg at all"), 1);
    }
}
