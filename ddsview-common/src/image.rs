use std::path::Path;

use crate::Size;

pub use image::ImageError;

/// A decoded image, normalized to tightly-packed RGBA8.
///
/// DDS decoding is delegated to the `image` crate; block-compressed
/// textures arrive here already expanded to RGBA8.
pub struct Image {
    pub bytes: Vec<u8>,
    pub size: Size<u32>,
    pub pitch: usize,
}

impl Image {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let image = image::open(path.as_ref())?.to_rgba8();

        let height = image.height();
        let width = image.width();
        let pitch = image
            .sample_layout()
            .height_stride
            .max(image.sample_layout().width_stride);

        Ok(Image {
            bytes: image.into_raw(),
            pitch,
            size: Size { height, width },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_normalizes_to_rgba8() {
        let path = std::env::temp_dir().join("ddsview-common-image-test.png");
        let buf = image::RgbImage::from_pixel(4, 2, image::Rgb([255u8, 0, 0]));
        buf.save(&path).unwrap();

        let loaded = Image::load(&path).unwrap();
        assert_eq!(loaded.size, Size::new(4, 2));
        assert_eq!(loaded.pitch, 4 * 4);
        assert_eq!(loaded.bytes.len(), 4 * 2 * 4);
        assert_eq!(&loaded.bytes[..4], &[255, 0, 0, 255]);

        std::fs::remove_file(&path).ok();
    }
}
