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

//! Structured data decoders (`json`, `ron`).
//!
//! Both syntaxes decode into the same [`serde_json::Value`] tree so consumers
//! never care which one a file used.

use super::{BoxError, DecodeContext, ResourceDecoder};
use serde_json::Value;
use tessera_core::resource::{DataDocument, DataTable};

fn parse_value(bytes: &[u8], ctx: &DecodeContext<'_>) -> Result<Value, BoxError> {
    match ctx.extension {
        "json" => Ok(serde_json::from_slice(bytes)?),
        "ron" => Ok(ron::de::from_bytes(bytes)?),
        other => Err(format!("No data parser for extension '.{other}'").into()),
    }
}

/// Standard data decoder: the parsed tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentDecoder;

impl ResourceDecoder<DataDocument> for DocumentDecoder {
    fn strategy_name(&self) -> &'static str {
        "DocumentDecoder"
    }

    fn decode(&self, bytes: &[u8], ctx: &DecodeContext<'_>) -> Result<DataDocument, BoxError> {
        Ok(DataDocument {
            root: parse_value(bytes, ctx)?,
        })
    }
}

/// Alternate data decoder: the tree flattened to dot-separated keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableDecoder;

impl ResourceDecoder<DataTable> for TableDecoder {
    fn strategy_name(&self) -> &'static str {
        "TableDecoder"
    }

    fn decode(&self, bytes: &[u8], ctx: &DecodeContext<'_>) -> Result<DataTable, BoxError> {
        Ok(DataTable::flatten(&parse_value(bytes, ctx)?))
    }
}
