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

//! Environment map decoders (`hdr`, `exr`).

use super::{texture_decoder::decode_image, BoxError, DecodeContext, ResourceDecoder};
use std::f32::consts::PI;
use tessera_core::{
    math::{Vec3, Vec4},
    resource::{CubeFace, CubeMap, EnvironmentMap, Extent2D},
};

fn decode_panorama(bytes: &[u8], ctx: &DecodeContext<'_>) -> Result<EnvironmentMap, BoxError> {
    let rgba = decode_image(bytes, ctx)?.to_rgba32f();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err("Environment map has no pixels".into());
    }

    Ok(EnvironmentMap {
        texels: rgba.pixels().map(|p| Vec4::from(p.0)).collect(),
        size: Extent2D { width, height },
    })
}

/// Standard environment decoder: the equirectangular panorama as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentMapDecoder;

impl ResourceDecoder<EnvironmentMap> for EnvironmentMapDecoder {
    fn strategy_name(&self) -> &'static str {
        "EnvironmentMapDecoder"
    }

    fn decode(&self, bytes: &[u8], ctx: &DecodeContext<'_>) -> Result<EnvironmentMap, BoxError> {
        decode_panorama(bytes, ctx)
    }
}

/// Alternate environment decoder: resamples the panorama onto six cube faces.
///
/// Faces are `max(1, height / 2)` pixels wide and use nearest sampling.
#[derive(Debug, Clone, Copy, Default)]
pub struct CubeMapDecoder;

impl ResourceDecoder<CubeMap> for CubeMapDecoder {
    fn strategy_name(&self) -> &'static str {
        "CubeMapDecoder"
    }

    fn decode(&self, bytes: &[u8], ctx: &DecodeContext<'_>) -> Result<CubeMap, BoxError> {
        Ok(equirect_to_cube(&decode_panorama(bytes, ctx)?))
    }
}

fn equirect_to_cube(panorama: &EnvironmentMap) -> CubeMap {
    let face_size = (panorama.size.height / 2).max(1);
    let faces = CubeFace::ALL.map(|face| {
        let mut texels = Vec::with_capacity((face_size * face_size) as usize);
        for j in 0..face_size {
            for i in 0..face_size {
                let u = 2.0 * (i as f32 + 0.5) / face_size as f32 - 1.0;
                let v = 2.0 * (j as f32 + 0.5) / face_size as f32 - 1.0;
                texels.push(sample(panorama, face_direction(face, u, v)));
            }
        }
        texels
    });

    CubeMap { face_size, faces }
}

/// Direction through face coordinates `(u, v)` in `[-1, 1]`, `v` pointing down.
fn face_direction(face: CubeFace, u: f32, v: f32) -> Vec3 {
    match face {
        CubeFace::PositiveX => Vec3::new(1.0, -v, -u),
        CubeFace::NegativeX => Vec3::new(-1.0, -v, u),
        CubeFace::PositiveY => Vec3::new(u, 1.0, v),
        CubeFace::NegativeY => Vec3::new(u, -1.0, -v),
        CubeFace::PositiveZ => Vec3::new(u, -v, 1.0),
        CubeFace::NegativeZ => Vec3::new(-u, -v, -1.0),
    }
    .normalize()
}

fn sample(panorama: &EnvironmentMap, dir: Vec3) -> Vec4 {
    let longitude = 0.5 + dir.z.atan2(dir.x) / (2.0 * PI);
    let latitude = dir.y.clamp(-1.0, 1.0).acos() / PI;
    let x = (longitude * panorama.size.width as f32) as u32;
    let y = (latitude * panorama.size.height as f32) as u32;
    panorama.texel(x, y)
}
