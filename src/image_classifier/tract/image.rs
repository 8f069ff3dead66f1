use crate::config::ResizeMode;
use crate::error::{Error, Result};
use image::{imageops, DynamicImage};
use tract_onnx::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub mean: [f32; 3],
    pub std: [f32; 3],
}

impl Normalization {
    pub const UNIT: Normalization = Normalization {
        mean: [0.0; 3],
        std: [1.0; 3],
    };
}

pub fn letterbox_image(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let (w, h) = (image.width() as f32, image.height() as f32);
    let scale = (width as f32 / w).min(height as f32 / h);
    let new_w = ((w * scale) as u32).clamp(1, width);
    let new_h = ((h * scale) as u32).clamp(1, height);

    let scaled = image
        .resize_exact(new_w, new_h, imageops::FilterType::Triangle)
        .to_rgb8();
    let mut padded = image::RgbImage::new(width, height);

    let x_offset = (width - new_w) / 2;
    let y_offset = (height - new_h) / 2;
    imageops::replace(&mut padded, &scaled, x_offset as i64, y_offset as i64);

    DynamicImage::ImageRgb8(padded)
}

pub fn resize_image(image: &DynamicImage, width: u32, height: u32, mode: ResizeMode) -> DynamicImage {
    if image.width() == width && image.height() == height {
        return image.clone();
    }
    match mode {
        ResizeMode::Stretch => image.resize_exact(width, height, imageops::FilterType::Triangle),
        ResizeMode::Letterbox => letterbox_image(image, width, height),
    }
}

/// NCHW float tensor, channels scaled to [0, 1] then normalized.
fn image_to_tensor(image: &DynamicImage, normalization: Normalization) -> Result<Tensor> {
    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    let array = tract_ndarray::Array4::from_shape_fn((1, 3, height, width), |(_, c, y, x)| {
        let value = rgb.get_pixel(x as u32, y as u32)[c] as f32 / 255.0;
        (value - normalization.mean[c]) / normalization.std[c]
    });

    if array.is_empty() {
        return Err(Error::Model("cannot build a tensor from an empty image".to_string()));
    }

    Ok(array.into_tensor())
}

pub fn resize_image_to_tensor(
    image: &DynamicImage,
    width: u32,
    height: u32,
    mode: ResizeMode,
    normalization: Normalization,
) -> Result<Tensor> {
    let resized = resize_image(image, width, height, mode);
    image_to_tensor(&resized, normalization)
}
