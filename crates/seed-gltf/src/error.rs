//! Error types for seed-gltf.
//!
//! A load fails in exactly one of three stages, each with its own error
//! type: reading the container, validating the raw document, or resolving
//! references into the asset graph. [`GltfError`] wraps all three.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for seed-gltf operations.
pub type Result<T> = std::result::Result<T, GltfError>;

/// Any error that aborts a load.
#[derive(Debug, Error)]
pub enum GltfError {
    /// No container reader is registered for the file extension.
    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),

    /// The container could not be read or decoded.
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// The raw document violates a field invariant.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A reference could not be resolved while building the asset graph.
    #[error("resolution failed: {0}")]
    Resolve(#[from] ResolveError),
}

/// Errors raised while reading a `.gltf` or `.glb` container.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// A file could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The JSON document could not be parsed into the raw model.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The GLB JSON chunk is not valid UTF-8.
    #[error("JSON chunk is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The GLB header does not start with `glTF`.
    #[error("illegal magic value in GLB header: {0:#010x}")]
    InvalidMagic(u32),

    /// The GLB header declares a container version other than 2.
    #[error("GLB version {0} not supported")]
    UnsupportedVersion(u32),

    /// The GLB header declares a total length with no room for chunks.
    #[error("GLB file has no content")]
    NoContent,

    /// A GLB chunk has an unexpected type.
    #[error("unexpected GLB chunk: expected {expected:#010x}, found {found:#010x}")]
    UnexpectedChunk {
        /// Chunk type required at this position.
        expected: u32,
        /// Chunk type read from the file.
        found: u32,
    },

    /// A GLB chunk declares zero length.
    #[error("GLB {0} chunk is empty")]
    EmptyChunk(&'static str),

    /// Fewer bytes were available than the container declares.
    #[error("short read while reading {0}")]
    ShortRead(&'static str),

    /// A base64 data URI payload is malformed.
    #[error("invalid base64 payload in {context}: {source}")]
    Base64 {
        /// Which buffer or image carried the payload.
        context: String,
        /// Underlying decoder error.
        #[source]
        source: base64::DecodeError,
    },

    /// A data URI that is not base64 encoded.
    #[error("unsupported data URI in {0}: only base64 payloads are supported")]
    UnsupportedDataUri(String),

    /// A buffer declares neither a URI nor an embedded GLB chunk.
    #[error("buffer {index} has no data source")]
    MissingBufferData {
        /// Buffer index.
        index: usize,
    },

    /// A buffer source yielded fewer bytes than `byteLength`.
    #[error("buffer {index} declares {expected} bytes but only {actual} were loaded")]
    BufferTooShort {
        /// Buffer index.
        index: usize,
        /// Declared `byteLength`.
        expected: usize,
        /// Bytes actually loaded.
        actual: usize,
    },
}

/// The first field found violating its invariant.
///
/// Displays as `<path> <message>`, e.g.
/// `materials[0].alphaMode should be one of [OPAQUE, MASK, BLEND] but is "FOO"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path} {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub path: String,
    /// Description of the violated rule.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for a field.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while resolving indices into references.
///
/// These indicate data the validator let through, typically because upper
/// bound checks were disabled with
/// [`LoadOptions::strict_bounds`](crate::LoadOptions::strict_bounds).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// An index points outside its target list.
    #[error("{referrer} references {kind} {index} but only {len} exist")]
    OutOfBounds {
        /// Name of the target list.
        kind: &'static str,
        /// Offending index.
        index: i64,
        /// Length of the target list.
        len: usize,
        /// Dotted path of the referencing field.
        referrer: String,
    },

    /// A node is reachable from itself through `children`.
    #[error("node {index} is its own ancestor")]
    NodeCycle {
        /// Node index where the cycle closed.
        index: usize,
    },

    /// A node has more levels of descendants than the configured limit.
    #[error("node {index} has more than {limit} levels below it")]
    NodeDepthExceeded {
        /// Node whose subtree is too deep.
        index: usize,
        /// Configured limit.
        limit: usize,
    },

    /// A buffer view range ends past its buffer's bytes.
    #[error("bufferViews[{index}] ends at byte {end} but its buffer holds {buffer_len}")]
    ViewOutOfRange {
        /// Buffer view index.
        index: usize,
        /// End offset of the view.
        end: usize,
        /// Bytes available in the buffer.
        buffer_len: usize,
    },

    /// The container produced no bytes for a declared buffer.
    #[error("no data loaded for buffer {index}")]
    MissingBufferData {
        /// Buffer index.
        index: usize,
    },

    /// A field holds a value the validator would have rejected.
    #[error("{referrer} {reason}")]
    Malformed {
        /// Dotted path of the field.
        referrer: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A node's skin was bound twice.
    #[error("node {node} already has a skin")]
    SkinAlreadyBound {
        /// Node index.
        node: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("asset.version", "should be equal to 2.0 but is \"1.0\"");
        assert_eq!(err.to_string(), "asset.version should be equal to 2.0 but is \"1.0\"");

        let wrapped = GltfError::from(err);
        assert!(wrapped.to_string().starts_with("validation failed: asset.version"));
    }

    #[test]
    fn test_out_of_bounds_display() {
        let err = ResolveError::OutOfBounds {
            kind: "accessor",
            index: 7,
            len: 2,
            referrer: "meshes[0].primitives[0].indices".into(),
        };
        assert_eq!(
            err.to_string(),
            "meshes[0].primitives[0].indices references accessor 7 but only 2 exist"
        );
    }
}
