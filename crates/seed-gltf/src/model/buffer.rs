//! Buffers, buffer views and accessors.

use std::sync::Arc;

use super::ExtensionData;

/// Raw binary payload.
#[derive(Debug, Clone)]
pub struct Buffer {
    /// Position in the asset's buffer list.
    pub index: usize,
    /// Data URI or relative path the bytes came from; `None` for the GLB
    /// binary chunk.
    pub uri: Option<String>,
    /// Declared length. `data` holds at least this many bytes.
    pub byte_length: usize,
    pub data: Vec<u8>,
    pub name: Option<String>,
    pub extensions: ExtensionData,
}

/// GPU binding hint for a buffer view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    ArrayBuffer,
    ElementArrayBuffer,
}

impl BufferTarget {
    pub const ALL: [BufferTarget; 2] =
        [BufferTarget::ArrayBuffer, BufferTarget::ElementArrayBuffer];

    /// GL enum value.
    pub fn code(self) -> i64 {
        match self {
            BufferTarget::ArrayBuffer => 34962,
            BufferTarget::ElementArrayBuffer => 34963,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

/// A contiguous byte range of a buffer.
#[derive(Debug, Clone)]
pub struct BufferView {
    pub index: usize,
    pub buffer: Arc<Buffer>,
    pub byte_offset: usize,
    pub byte_length: usize,
    /// Distance in bytes between vertex attribute elements, 4..=252.
    pub byte_stride: Option<usize>,
    pub target: Option<BufferTarget>,
    pub name: Option<String>,
    pub extensions: ExtensionData,
}

impl BufferView {
    /// The bytes covered by this view.
    pub fn data(&self) -> &[u8] {
        &self.buffer.data[self.byte_offset..self.byte_offset + self.byte_length]
    }
}

/// Scalar type of an accessor component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    UnsignedInt,
    Float,
}

impl ComponentType {
    pub const ALL: [ComponentType; 6] = [
        ComponentType::Byte,
        ComponentType::UnsignedByte,
        ComponentType::Short,
        ComponentType::UnsignedShort,
        ComponentType::UnsignedInt,
        ComponentType::Float,
    ];

    /// Component types allowed for sparse indices.
    pub const UNSIGNED: [ComponentType; 3] = [
        ComponentType::UnsignedByte,
        ComponentType::UnsignedShort,
        ComponentType::UnsignedInt,
    ];

    /// GL enum value.
    pub fn code(self) -> i64 {
        match self {
            ComponentType::Byte => 5120,
            ComponentType::UnsignedByte => 5121,
            ComponentType::Short => 5122,
            ComponentType::UnsignedShort => 5123,
            ComponentType::UnsignedInt => 5125,
            ComponentType::Float => 5126,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Size of one component in bytes.
    pub fn byte_size(self) -> usize {
        match self {
            ComponentType::Byte | ComponentType::UnsignedByte => 1,
            ComponentType::Short | ComponentType::UnsignedShort => 2,
            ComponentType::UnsignedInt | ComponentType::Float => 4,
        }
    }
}

/// Shape of an accessor element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl ElementType {
    pub const ALL: [ElementType; 7] = [
        ElementType::Scalar,
        ElementType::Vec2,
        ElementType::Vec3,
        ElementType::Vec4,
        ElementType::Mat2,
        ElementType::Mat3,
        ElementType::Mat4,
    ];

    /// Name used in the JSON document.
    pub fn name(self) -> &'static str {
        match self {
            ElementType::Scalar => "SCALAR",
            ElementType::Vec2 => "VEC2",
            ElementType::Vec3 => "VEC3",
            ElementType::Vec4 => "VEC4",
            ElementType::Mat2 => "MAT2",
            ElementType::Mat3 => "MAT3",
            ElementType::Mat4 => "MAT4",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Number of components per element.
    pub fn component_count(self) -> usize {
        match self {
            ElementType::Scalar => 1,
            ElementType::Vec2 => 2,
            ElementType::Vec3 => 3,
            ElementType::Vec4 | ElementType::Mat2 => 4,
            ElementType::Mat3 => 9,
            ElementType::Mat4 => 16,
        }
    }
}

/// Where the replacement indices of a sparse accessor live.
#[derive(Debug, Clone)]
pub struct SparseIndices {
    pub buffer_view: Arc<BufferView>,
    pub byte_offset: usize,
    /// Always one of [`ComponentType::UNSIGNED`].
    pub component_type: ComponentType,
    pub extensions: ExtensionData,
}

/// Where the replacement values of a sparse accessor live.
#[derive(Debug, Clone)]
pub struct SparseValues {
    pub buffer_view: Arc<BufferView>,
    pub byte_offset: usize,
    pub extensions: ExtensionData,
}

/// Index/value overrides applied on top of an accessor's base data.
#[derive(Debug, Clone)]
pub struct Sparse {
    /// Number of overridden elements.
    pub count: usize,
    pub indices: SparseIndices,
    pub values: SparseValues,
    pub extensions: ExtensionData,
}

/// Typed view over a buffer view.
///
/// When `buffer_view` is `None` the base data is all zeros and only the
/// `sparse` overrides carry values.
#[derive(Debug, Clone)]
pub struct Accessor {
    pub index: usize,
    pub buffer_view: Option<Arc<BufferView>>,
    pub byte_offset: usize,
    pub component_type: ComponentType,
    pub normalized: bool,
    /// Number of elements.
    pub count: usize,
    pub element_type: ElementType,
    pub max: Option<Vec<f32>>,
    pub min: Option<Vec<f32>>,
    pub sparse: Option<Sparse>,
    pub name: Option<String>,
    pub extensions: ExtensionData,
}

impl Accessor {
    /// Size in bytes of one tightly packed element.
    pub fn element_size(&self) -> usize {
        self.element_type.component_count() * self.component_type.byte_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_type_codes() {
        assert_eq!(ComponentType::from_code(5126), Some(ComponentType::Float));
        assert_eq!(ComponentType::from_code(5124), None);
        assert_eq!(ComponentType::UnsignedShort.byte_size(), 2);
        for ty in ComponentType::ALL {
            assert_eq!(ComponentType::from_code(ty.code()), Some(ty));
        }
    }

    #[test]
    fn test_element_type_counts() {
        assert_eq!(ElementType::from_name("MAT3"), Some(ElementType::Mat3));
        assert_eq!(ElementType::from_name("mat3"), None);
        let counts: Vec<usize> = ElementType::ALL.iter().map(|t| t.component_count()).collect();
        assert_eq!(counts, [1, 2, 3, 4, 4, 9, 16]);
    }

    #[test]
    fn test_buffer_view_data_slices_buffer() {
        let buffer = Arc::new(Buffer {
            index: 0,
            uri: None,
            byte_length: 6,
            data: b"abcdef".to_vec(),
            name: None,
            extensions: ExtensionData::default(),
        });
        let view = BufferView {
            index: 0,
            buffer,
            byte_offset: 2,
            byte_length: 3,
            byte_stride: None,
            target: Some(BufferTarget::ArrayBuffer),
            name: None,
            extensions: ExtensionData::default(),
        };
        assert_eq!(view.data(), b"cde");
    }
}
