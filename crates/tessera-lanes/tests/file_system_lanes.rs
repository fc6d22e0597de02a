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

use tessera_lanes::{
    decode_lane::{DocumentDecoder, MergedMeshDecoder, TableDecoder},
    DecodeContext, FileSystemFetcher, ResourceDecoder, ResourceFetcher,
};

const CUBE_CORNER_OBJ: &str = "\
o corner
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
f 1 2 3
f 1 3 4
";

#[tokio::test]
async fn fetch_then_decode_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("corner.obj"), CUBE_CORNER_OBJ).unwrap();
    std::fs::write(dir.path().join("level.json"), r#"{"spawn": {"x": 4}}"#).unwrap();

    let fetcher = FileSystemFetcher::new();

    let obj_path = format!("{}/corner.obj", dir.path().display());
    let bytes = fetcher.fetch(&obj_path).await.unwrap();
    let mesh = MergedMeshDecoder
        .decode(&bytes, &DecodeContext::new(&obj_path, &fetcher))
        .unwrap();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.index_count(), 6);

    let json_path = format!("{}/level.json", dir.path().display());
    let bytes = fetcher.fetch(&json_path).await.unwrap();
    let ctx = DecodeContext::new(&json_path, &fetcher);
    let document = DocumentDecoder.decode(&bytes, &ctx).unwrap();
    assert_eq!(document.pointer("/spawn/x"), Some(&serde_json::json!(4)));
    let table = TableDecoder.decode(&bytes, &ctx).unwrap();
    assert_eq!(table.get("spawn.x"), Some(&serde_json::json!(4)));
}

#[tokio::test]
async fn missing_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = format!("{}/nowhere.png", dir.path().display());

    let err = FileSystemFetcher::new().fetch(&path).await.unwrap_err();
    assert!(err.to_string().contains("nowhere.png"), "{err}");
}
