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

use tessera_sdk::{declare_directory, prelude::*};

#[tokio::test]
async fn declares_supported_files_only() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("level.json"), r#"{"a": [1, 2]}"#)?;
    std::fs::write(dir.path().join("rules.ron"), r#"{"speed": 3}"#)?;
    std::fs::write(dir.path().join("notes.txt"), "ignored")?;
    std::fs::create_dir(dir.path().join("nested.json"))?;

    let registry = ResourceRegistry::new(dir.path().display().to_string());
    let declared = declare_directory(&registry, dir.path(), Backend::Alternate)?;

    assert_eq!(declared, vec!["level.json", "rules.ron"]);
    assert_eq!(registry.names().len(), 2);

    registry.load().await?;
    let level = registry.get_as::<DataTable>("level")?;
    assert_eq!(level.len(), 2);
    let rules = registry.get_as::<DataTable>("rules")?;
    assert!(rules.get("speed").is_some());
    Ok(())
}

#[test]
fn missing_directory_is_an_error() {
    let registry = ResourceRegistry::new("nowhere");
    let err = declare_directory(&registry, "definitely/not/here", Backend::Standard).unwrap_err();
    assert!(err.to_string().contains("definitely/not/here"), "{err}");
}
