//! Image decoding into channel-first pixel arrays.

use crate::common::*;

/// The channel layout requested from [read_image].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorMode {
    /// Three RGB channels.
    Color,
    /// One luminance channel.
    Grayscale,
}

impl ColorMode {
    pub fn channels(&self) -> usize {
        match self {
            Self::Color => 3,
            Self::Grayscale => 1,
        }
    }
}

impl Default for ColorMode {
    fn default() -> Self {
        Self::Color
    }
}

/// Reads an image file into a `(channels, height, width)` array.
///
/// Pixel values are kept in the `[0, 255]` range.
pub fn read_image(path: impl AsRef<Path>, mode: ColorMode) -> Result<Array3<f32>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DatasetError::FileNotFound {
            path: path.to_owned(),
        }
        .into());
    }

    let image = image::open(path).map_err(|source| DatasetError::Image {
        path: path.to_owned(),
        source,
    })?;

    let array = match mode {
        ColorMode::Color => {
            let rgb = image.to_rgb8();
            let (width, height) = rgb.dimensions();
            Array3::from_shape_fn((3, height as usize, width as usize), |(c, y, x)| {
                rgb.get_pixel(x as u32, y as u32).0[c] as f32
            })
        }
        ColorMode::Grayscale => {
            let luma = image.to_luma8();
            let (width, height) = luma.dimensions();
            Array3::from_shape_fn((1, height as usize, width as usize), |(_, y, x)| {
                luma.get_pixel(x as u32, y as u32).0[0] as f32
            })
        }
    };

    Ok(array)
}
