//! Reader for the binary `.glb` container.
//!
//! Layout, all little-endian:
//!
//! ```text
//! header:  magic u32 | version u32 | totalLength u32
//! chunk 0: chunkLength u32 | chunkType u32 ("JSON") | bytes
//! chunk 1: chunkLength u32 | chunkType u32 ("BIN\0") | bytes   (optional)
//! ```

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::error::ContainerError;
use crate::options::LoadOptions;
use crate::raw::{Gltf, RawAsset};

use super::resources::{check_buffer_length, load_buffer, load_images};
use super::ContainerReader;

/// GLB magic number.
pub const GLB_MAGIC: u32 = 0x46546C67; // "glTF" in little-endian
/// GLB version 2.
pub const GLB_VERSION: u32 = 2;
/// JSON chunk type.
pub const GLB_CHUNK_JSON: u32 = 0x4E4F534A; // "JSON" in little-endian
/// Binary chunk type.
pub const GLB_CHUNK_BIN: u32 = 0x004E4942; // "BIN\0" in little-endian

const HEADER_LEN: u32 = 12;
const CHUNK_HEADER_LEN: u32 = 8;

/// Reader for `.glb` files.
pub struct GlbReader;

impl GlbReader {
    /// Create a new GLB reader.
    pub fn new() -> Self {
        Self
    }

    /// Read a GLB stream. External resources resolve against `base_dir`.
    pub fn read_from<R: Read>(
        &self,
        mut reader: R,
        base_dir: &Path,
        options: &LoadOptions,
    ) -> Result<RawAsset, ContainerError> {
        let magic = read_u32(&mut reader, "header")?;
        if magic != GLB_MAGIC {
            return Err(ContainerError::InvalidMagic(magic));
        }
        let version = read_u32(&mut reader, "header")?;
        if version != GLB_VERSION {
            return Err(ContainerError::UnsupportedVersion(version));
        }
        let total_length = read_u32(&mut reader, "header")?;
        if total_length <= HEADER_LEN {
            return Err(ContainerError::NoContent);
        }

        let json = read_chunk(&mut reader, GLB_CHUNK_JSON, "JSON")?;
        let gltf: Gltf = serde_json::from_str(std::str::from_utf8(&json)?)?;

        let has_bin = u64::from(total_length - HEADER_LEN)
            > json.len() as u64 + u64::from(CHUNK_HEADER_LEN);
        let bin = if has_bin {
            Some(read_chunk(&mut reader, GLB_CHUNK_BIN, "BIN")?)
        } else {
            None
        };

        tracing::debug!(
            total_length,
            json_len = json.len(),
            bin_len = bin.as_ref().map(Vec::len),
            "parsed GLB header"
        );

        let buffers = resolve_buffers(&gltf, bin, base_dir)?;
        let images = load_images(&gltf, base_dir, options)?;

        Ok(RawAsset { gltf, buffers, images })
    }
}

impl Default for GlbReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerReader for GlbReader {
    fn name(&self) -> &'static str {
        "glb"
    }

    fn extensions(&self) -> &[&'static str] {
        &["glb"]
    }

    fn read(&self, path: &Path, options: &LoadOptions) -> Result<RawAsset, ContainerError> {
        let file = File::open(path).map_err(|source| ContainerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        self.read_from(BufReader::new(file), base_dir, options)
    }
}

/// Attach the BIN chunk to buffer 0 when it has no `uri` and load every
/// other buffer from its URI.
fn resolve_buffers(
    gltf: &Gltf,
    mut bin: Option<Vec<u8>>,
    base_dir: &Path,
) -> Result<Vec<Vec<u8>>, ContainerError> {
    let declared = gltf.buffers.as_deref().unwrap_or_default();
    let mut buffers = Vec::with_capacity(declared.len());

    for (i, buffer) in declared.iter().enumerate() {
        if i == 0 && buffer.uri.is_none() {
            let data = bin.take().ok_or(ContainerError::MissingBufferData { index: 0 })?;
            check_buffer_length(0, buffer, &data)?;
            buffers.push(data);
        } else {
            buffers.push(load_buffer(i, buffer, base_dir)?);
        }
    }

    if bin.is_some() {
        tracing::warn!("GLB binary chunk ignored: buffer 0 declares a uri or no buffers exist");
    }

    Ok(buffers)
}

fn read_u32<R: Read>(reader: &mut R, what: &'static str) -> Result<u32, ContainerError> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes).map_err(|e| short_read(e, what))?;
    Ok(u32::from_le_bytes(bytes))
}

/// Read one chunk of the expected type.
fn read_chunk<R: Read>(
    reader: &mut R,
    expected: u32,
    label: &'static str,
) -> Result<Vec<u8>, ContainerError> {
    let length = read_u32(reader, label)?;
    let chunk_type = read_u32(reader, label)?;
    if chunk_type != expected {
        return Err(ContainerError::UnexpectedChunk {
            expected,
            found: chunk_type,
        });
    }
    if length == 0 {
        return Err(ContainerError::EmptyChunk(label));
    }

    // Grow with the data actually present instead of trusting the header.
    let mut data = Vec::new();
    reader
        .by_ref()
        .take(u64::from(length))
        .read_to_end(&mut data)
        .map_err(|e| short_read(e, label))?;
    if data.len() != length as usize {
        return Err(ContainerError::ShortRead(label));
    }
    Ok(data)
}

fn short_read(err: std::io::Error, what: &'static str) -> ContainerError {
    if err.kind() != ErrorKind::UnexpectedEof {
        tracing::debug!(error = %err, what, "GLB read failed");
    }
    ContainerError::ShortRead(what)
}
