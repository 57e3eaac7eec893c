//! Buffer and image payload resolution shared by the container readers.

use std::path::Path;

use base64::Engine;

use crate::error::ContainerError;
use crate::options::LoadOptions;
use crate::raw::{self, Gltf};

type Result<T> = std::result::Result<T, ContainerError>;

/// Decode a `data:<mime>;base64,<payload>` URI.
///
/// Returns `Ok(None)` when `uri` is not a data URI, in which case it names
/// a file.
///
/// ```
/// use seed_gltf::container::decode_data_uri;
///
/// let bytes = decode_data_uri("data:application/octet-stream;base64,QUJD").unwrap();
/// assert_eq!(bytes.as_deref(), Some(&b"ABC"[..]));
/// assert!(decode_data_uri("scene.bin").unwrap().is_none());
/// ```
pub fn decode_data_uri(uri: &str) -> Result<Option<Vec<u8>>> {
    decode_embedded(uri, "data URI")
}

fn decode_embedded(uri: &str, context: &str) -> Result<Option<Vec<u8>>> {
    // Format: data:[<mediatype>][;base64],<data>
    let Some((header, payload)) = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
    else {
        return Ok(None);
    };

    if !header.ends_with(";base64") {
        return Err(ContainerError::UnsupportedDataUri(context.to_string()));
    }

    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map(Some)
        .map_err(|source| ContainerError::Base64 {
            context: context.to_string(),
            source,
        })
}

/// Load the bytes a URI points at: inline for data URIs, otherwise the file
/// at `uri` relative to `base_dir`.
fn load_uri(uri: &str, base_dir: &Path, context: &str) -> Result<Vec<u8>> {
    if let Some(data) = decode_embedded(uri, context)? {
        tracing::trace!(context, bytes = data.len(), "decoded data URI");
        return Ok(data);
    }

    let path = base_dir.join(uri);
    tracing::trace!(context, path = %path.display(), "reading external file");
    std::fs::read(&path).map_err(|source| ContainerError::Io { path, source })
}

/// Load the bytes of a buffer declared with a `uri`.
pub(crate) fn load_buffer(index: usize, buffer: &raw::Buffer, base_dir: &Path) -> Result<Vec<u8>> {
    let uri = buffer
        .uri
        .as_deref()
        .ok_or(ContainerError::MissingBufferData { index })?;
    let data = load_uri(uri, base_dir, &format!("buffers[{index}]"))?;
    check_buffer_length(index, buffer, &data)?;
    Ok(data)
}

/// Ensure a buffer source holds at least `byteLength` bytes.
///
/// A negative `byteLength` is left for the validator to report.
pub(crate) fn check_buffer_length(index: usize, buffer: &raw::Buffer, data: &[u8]) -> Result<()> {
    let expected = usize::try_from(buffer.byte_length).unwrap_or(0);
    if data.len() < expected {
        return Err(ContainerError::BufferTooShort {
            index,
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Load the payload of every URI-backed image.
///
/// Images backed by a buffer view, and all images when
/// [`LoadOptions::load_images`] is off, yield `None`.
pub(crate) fn load_images(
    gltf: &Gltf,
    base_dir: &Path,
    options: &LoadOptions,
) -> Result<Vec<Option<Vec<u8>>>> {
    let Some(images) = &gltf.images else {
        return Ok(Vec::new());
    };

    images
        .iter()
        .enumerate()
        .map(|(i, image)| match (&image.uri, image.buffer_view) {
            (Some(uri), None) if options.load_images => {
                load_uri(uri, base_dir, &format!("images[{i}]")).map(Some)
            }
            _ => Ok(None),
        })
        .collect()
}
