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

//! Fixtures shared by the integration tests. Everything is generated in
//! memory so no binary files live in the repository.

#![allow(dead_code)]

use image::{codecs::hdr::HdrEncoder, DynamicImage, ImageFormat, Rgb, RgbaImage};
use std::{io::Cursor, sync::Arc, time::Duration};
use tessera_agents::ResourceRegistry;
use tessera_lanes::MemoryFetcher;

pub const BASE: &str = "assets";

pub const TRIANGLE_OBJ: &str = "\
o tri
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";

pub const LEVEL_JSON: &str = r#"{"name": "docks", "spawn": {"x": 4, "y": 2}, "lights": [1, 2]}"#;

pub const LEVEL_RON: &str = r#"{"name": "docks", "spawn": {"x": 4, "y": 2}}"#;

/// Binary glTF with a single indexed triangle.
pub fn triangle_glb() -> Vec<u8> {
    let mut bin = Vec::new();
    for v in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
        for c in v {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    for i in [0u16, 1, 2] {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    bin.extend_from_slice(&[0, 0]);

    let mut json = format!(
        r#"{{"asset":{{"version":"2.0"}},"buffers":[{{"byteLength":{}}}],"bufferViews":[{{"buffer":0,"byteOffset":0,"byteLength":36}},{{"buffer":0,"byteOffset":36,"byteLength":6}}],"accessors":[{{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0.0,0.0,0.0],"max":[1.0,1.0,0.0]}},{{"bufferView":1,"componentType":5123,"count":3,"type":"SCALAR"}}],"meshes":[{{"name":"tri","primitives":[{{"attributes":{{"POSITION":0}},"indices":1}}]}}]}}"#,
        bin.len()
    )
    .into_bytes();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }

    let total = 12 + 8 + json.len() + 8 + bin.len();
    let mut glb = Vec::with_capacity(total);
    glb.extend_from_slice(b"glTF");
    glb.extend_from_slice(&2u32.to_le_bytes());
    glb.extend_from_slice(&(total as u32).to_le_bytes());
    glb.extend_from_slice(&(json.len() as u32).to_le_bytes());
    glb.extend_from_slice(b"JSON");
    glb.extend_from_slice(&json);
    glb.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    glb.extend_from_slice(b"BIN\0");
    glb.extend_from_slice(&bin);
    glb
}

/// A `width` x `height` opaque red PNG.
pub fn red_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// A 4x2 Radiance HDR panorama of constant radiance.
pub fn grey_hdr() -> Vec<u8> {
    let pixels = vec![Rgb([0.5f32, 0.5, 0.5]); 8];
    let mut bytes = Vec::new();
    HdrEncoder::new(&mut bytes).encode(&pixels, 4, 2).unwrap();
    bytes
}

/// One file of every supported family, keyed by filename.
pub fn every_kind() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("hero.glb", triangle_glb()),
        ("crate.obj", TRIANGLE_OBJ.as_bytes().to_vec()),
        ("albedo.png", red_png(2, 2)),
        ("sky.hdr", grey_hdr()),
        ("level.json", LEVEL_JSON.as_bytes().to_vec()),
        ("rules.ron", LEVEL_RON.as_bytes().to_vec()),
    ]
}

/// Serves `files` below [`BASE`], each after `latency`.
pub fn memory_files(files: &[(&str, Vec<u8>)], latency: Duration) -> Arc<MemoryFetcher> {
    let fetcher = Arc::new(MemoryFetcher::new());
    for (filename, bytes) in files {
        fetcher.insert_with_latency(format!("{BASE}/{filename}"), bytes.clone(), latency);
    }
    fetcher
}

/// A registry rooted at [`BASE`] reading from `fetcher`.
pub fn registry_over(fetcher: &Arc<MemoryFetcher>) -> ResourceRegistry {
    ResourceRegistry::builder()
        .base_path(BASE)
        .fetcher(fetcher.clone())
        .build()
}
