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

//! Decoded 2D images.

use crate::asset::Asset;

/// Width and height of an image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent2D {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Pixel layout of a [`Texture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8 bits per channel RGBA, sRGB encoded color.
    Rgba8UnormSrgb,
}

impl TextureFormat {
    /// Bytes per pixel.
    pub fn block_size(self) -> usize {
        match self {
            TextureFormat::Rgba8UnormSrgb => 4,
        }
    }
}

/// CPU-side texture ready to upload: tightly packed RGBA8 sRGB rows.
///
/// This is the `Texture`/`Standard` shape.
#[derive(Debug, Clone)]
pub struct Texture {
    /// Raw pixel data, row-major, no padding.
    pub pixels: Vec<u8>,
    /// Size in pixels.
    pub size: Extent2D,
    /// Pixel layout of `pixels`.
    pub format: TextureFormat,
}

impl Asset for Texture {}

impl Texture {
    /// Bytes per row.
    pub fn bytes_per_row(&self) -> usize {
        self.size.width as usize * self.format.block_size()
    }
}

/// A decoded image kept in its source pixel format.
///
/// This is the `Texture`/`Alternate` shape: the alternate engine does its own
/// conversion, so no channel expansion or color-space handling happens here.
#[derive(Debug, Clone)]
pub struct Image {
    /// The decoded image.
    pub image: image::DynamicImage,
}

impl Asset for Image {}

impl Image {
    /// Size in pixels.
    pub fn size(&self) -> Extent2D {
        Extent2D {
            width: self.image.width(),
            height: self.image.height(),
        }
    }

    /// The source pixel format.
    pub fn color_type(&self) -> image::ColorType {
        self.image.color()
    }
}
