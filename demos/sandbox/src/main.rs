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

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tessera_sdk::{declare_directory, prelude::*, telemetry::MetricId};

#[derive(Parser, Debug)]
#[command(name = "tessera-sandbox")]
#[command(about = "Loads every supported resource of a directory")]
struct CliArgs {
    /// Directory holding the resources.
    dir: String,

    /// Decode with the alternate backend.
    #[arg(long)]
    alternate: bool,

    /// Maximum number of resources loaded at once.
    #[arg(long, short)]
    jobs: Option<usize>,

    /// Log level when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: log::LevelFilter,
}

fn describe(resource: &Resource) -> String {
    match resource {
        Resource::Model(model) => format!(
            "{} meshes, {} vertices",
            model.meshes.len(),
            model.vertex_count()
        ),
        Resource::Mesh(mesh) => format!(
            "{} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        ),
        Resource::Texture(texture) => {
            format!("{}x{} rgba8", texture.size.width, texture.size.height)
        }
        Resource::Image(image) => {
            let size = image.size();
            format!("{}x{} {:?}", size.width, size.height, image.color_type())
        }
        Resource::EnvironmentMap(map) => format!(
            "{}x{} panorama, peak luminance {:.2}",
            map.size.width,
            map.size.height,
            map.peak_luminance()
        ),
        Resource::CubeMap(cube) => format!("6 faces of {}px", cube.face_size),
        Resource::Document(doc) => format!("{} document", value_kind(doc)),
        Resource::Table(table) => format!("{} keys", table.len()),
    }
}

fn value_kind(doc: &DataDocument) -> &'static str {
    if doc.root.is_object() {
        "object"
    } else if doc.root.is_array() {
        "array"
    } else {
        "scalar"
    }
}

async fn run(args: CliArgs) -> Result<()> {
    let backend = if args.alternate {
        Backend::Alternate
    } else {
        Backend::Standard
    };

    let mut builder = ResourceRegistry::builder()
        .base_path(args.dir.clone())
        .default_backend(backend);
    if let Some(jobs) = args.jobs {
        builder = builder.max_concurrent_loads(jobs);
    }
    let registry = builder.build();

    let declared = declare_directory(&registry, &args.dir, backend)
        .with_context(|| format!("Failed to scan '{}'", args.dir))?;
    if declared.is_empty() {
        log::warn!("No supported resources in '{}'", args.dir);
        return Ok(());
    }

    registry
        .load_with_progress(|progress| {
            log::info!(
                "[{:>5.1}%] {} as {}: {}",
                progress.percentage,
                progress.current.name,
                progress.current.resource.shape(),
                describe(&progress.current.resource)
            );
        })
        .await?;

    let decode_time = registry
        .metrics()
        .get(&MetricId::new("resources", "decode_time"))?;
    log::info!(
        "Loaded {} resources on the {} backend ({} decodes timed)",
        declared.len(),
        backend,
        decode_time.sample_count().unwrap_or(0)
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.log_level);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
