// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Texture decoders (`png`, `jpg`, `jpeg`, `webp`, `bmp`, `tga`).

use super::{BoxError, DecodeContext, ResourceDecoder};
use anyhow::Context;
use image::{DynamicImage, ImageFormat};
use tessera_core::resource::{Extent2D, Image, Texture, TextureFormat};

/// Decodes with the format named by the file extension rather than sniffing,
/// so a mislabelled file fails instead of decoding as something else.
pub(crate) fn decode_image(bytes: &[u8], ctx: &DecodeContext<'_>) -> Result<DynamicImage, BoxError> {
    let format = ImageFormat::from_extension(ctx.extension)
        .with_context(|| format!("No image format for extension '.{}'", ctx.extension))?;
    let image = image::load_from_memory_with_format(bytes, format)
        .with_context(|| format!("Failed to decode {format:?} image from memory"))?;
    Ok(image)
}

/// Standard texture decoder: RGBA8 in sRGB space.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureDecoder;

impl ResourceDecoder<Texture> for TextureDecoder {
    fn strategy_name(&self) -> &'static str {
        "TextureDecoder"
    }

    fn decode(&self, bytes: &[u8], ctx: &DecodeContext<'_>) -> Result<Texture, BoxError> {
        let rgba = decode_image(bytes, ctx)?.to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Texture {
            pixels: rgba.into_raw(),
            size: Extent2D { width, height },
            format: TextureFormat::Rgba8UnormSrgb,
        })
    }
}

/// Alternate texture decoder: keeps the source pixel format.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDecoder;

impl ResourceDecoder<Image> for ImageDecoder {
    fn strategy_name(&self) -> &'static str {
        "ImageDecoder"
    }

    fn decode(&self, bytes: &[u8], ctx: &DecodeContext<'_>) -> Result<Image, BoxError> {
        Ok(Image {
            image: decode_image(bytes, ctx)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode_lane::test_support::ctx;
    use image::{ColorType, GrayImage, Luma};
    use std::io::Cursor;

    fn gray_png() -> Vec<u8> {
        let img = GrayImage::from_fn(2, 1, |x, _| Luma([if x == 0 { 0 } else { 255 }]));
        let mut bytes = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn texture_is_expanded_to_rgba8() {
        let texture = TextureDecoder
            .decode(&gray_png(), &ctx("ui/bar.png"))
            .unwrap();
        assert_eq!(texture.size, Extent2D { width: 2, height: 1 });
        assert_eq!(texture.pixels, vec![0, 0, 0, 255, 255, 255, 255, 255]);
        assert_eq!(texture.bytes_per_row(), 8);
    }

    #[test]
    fn image_keeps_source_format() {
        let image = ImageDecoder.decode(&gray_png(), &ctx("ui/bar.png")).unwrap();
        assert_eq!(image.color_type(), ColorType::L8);
        assert_eq!(image.size().width, 2);
    }

    #[test]
    fn wrong_container_fails() {
        assert!(TextureDecoder.decode(&gray_png(), &ctx("ui/bar.jpg")).is_err());
        assert!(TextureDecoder.decode(b"junk", &ctx("ui/bar.png")).is_err());
    }
}
