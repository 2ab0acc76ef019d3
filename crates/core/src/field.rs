use serde::{Deserialize, Serialize};

/// Scalar type stored in a record field.
///
/// Discriminants match the `sensor_msgs/PointField` datatype codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum FieldType {
    Int8 = 1,
    UInt8 = 2,
    Int16 = 3,
    UInt16 = 4,
    Int32 = 5,
    UInt32 = 6,
    Float32 = 7,
    Float64 = 8,
}

impl FieldType {
    /// Size in bytes of one element of this type.
    pub fn size(self) -> usize {
        match self {
            FieldType::Int8 | FieldType::UInt8 => 1,
            FieldType::Int16 | FieldType::UInt16 => 2,
            FieldType::Int32 | FieldType::UInt32 | FieldType::Float32 => 4,
            FieldType::Float64 => 8,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(FieldType::Int8),
            2 => Some(FieldType::UInt8),
            3 => Some(FieldType::Int16),
            4 => Some(FieldType::UInt16),
            5 => Some(FieldType::Int32),
            6 => Some(FieldType::UInt32),
            7 => Some(FieldType::Float32),
            8 => Some(FieldType::Float64),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A named, offset-addressed region inside every record of a cloud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub offset: usize,
    pub datatype: FieldType,
    pub count: usize,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, offset: usize, datatype: FieldType) -> Self {
        Self {
            name: name.into(),
            offset,
            datatype,
            count: 1,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Number of bytes the field occupies inside a record, or `None` if
    /// `count` overflows.
    pub fn byte_len(&self) -> Option<usize> {
        self.datatype.size().checked_mul(self.count)
    }

    /// First byte past the end of the field, or `None` on overflow.
    pub fn end(&self) -> Option<usize> {
        self.offset.checked_add(self.byte_len()?)
    }
}

/// Returns the index of the first field whose name equals `name` exactly.
pub fn find_field_index(fields: &[FieldDescriptor], name: &str) -> Option<usize> {
    fields.iter().position(|f| f.name == name)
}

/// Reads the four bytes at `offset` in `record` as a little-endian `f32`.
///
/// A field too short to hold four bytes at the end of the record reads as
/// NaN, so it falls out of every finiteness filter.
#[inline]
pub fn read_f32(record: &[u8], offset: usize) -> f32 {
    offset
        .checked_add(4)
        .and_then(|end| record.get(offset..end))
        .and_then(|bytes| <[u8; 4]>::try_from(bytes).ok())
        .map(f32::from_le_bytes)
        .unwrap_or(f32::NAN)
}
