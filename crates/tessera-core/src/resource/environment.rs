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

//! Decoded HDR environments.

use super::Extent2D;
use crate::{asset::Asset, math::Vec4};

/// An equirectangular HDR panorama in linear RGBA32F.
///
/// This is the `EnvironmentMap`/`Standard` shape.
#[derive(Debug, Clone)]
pub struct EnvironmentMap {
    /// Linear radiance, row-major, top row first.
    pub texels: Vec<Vec4>,
    /// Size in pixels. Width is usually twice the height.
    pub size: Extent2D,
}

impl Asset for EnvironmentMap {}

impl EnvironmentMap {
    /// Texel at `(x, y)`, clamped to the image.
    pub fn texel(&self, x: u32, y: u32) -> Vec4 {
        let x = x.min(self.size.width.saturating_sub(1));
        let y = y.min(self.size.height.saturating_sub(1));
        self.texels[(y * self.size.width + x) as usize]
    }

    /// Highest luminance in the panorama, useful for exposure setup.
    pub fn peak_luminance(&self) -> f32 {
        self.texels
            .iter()
            .map(|t| 0.2126 * t.x + 0.7152 * t.y + 0.0722 * t.z)
            .fold(0.0, f32::max)
    }
}

/// Cube faces in the usual `+X, -X, +Y, -Y, +Z, -Z` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    /// +X
    PositiveX,
    /// -X
    NegativeX,
    /// +Y
    PositiveY,
    /// -Y
    NegativeY,
    /// +Z
    PositiveZ,
    /// -Z
    NegativeZ,
}

impl CubeFace {
    /// All faces in storage order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];
}

/// Six square RGBA32F faces resampled from an equirectangular source.
///
/// This is the `EnvironmentMap`/`Alternate` shape.
#[derive(Debug, Clone)]
pub struct CubeMap {
    /// Face edge length in pixels.
    pub face_size: u32,
    /// Face texels in [`CubeFace::ALL`] order, each `face_size * face_size` long.
    pub faces: [Vec<Vec4>; 6],
}

impl Asset for CubeMap {}

impl CubeMap {
    /// Texels of one face.
    pub fn face(&self, face: CubeFace) -> &[Vec4] {
        &self.faces[face as usize]
    }
}
