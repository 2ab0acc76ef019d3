use thiserror::Error;

/// Errors raised when building or writing a point cloud buffer.
///
/// Handlers never produce these; they only guard the container side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("point_step must be non-zero")]
    ZeroStride,

    #[error("field `{name}` spans bytes {offset}..{end} but point_step is {point_step}")]
    FieldOutOfBounds {
        name: String,
        offset: usize,
        end: usize,
        point_step: usize,
    },

    #[error("layout size overflows usize")]
    Overflow,

    #[error("data buffer has {actual} bytes, expected {expected}")]
    DataLength { expected: usize, actual: usize },

    #[error("no field named `{0}`")]
    UnknownField(String),

    #[error("field `{name}` is {datatype:?}, expected Float32")]
    NotFloat32 {
        name: String,
        datatype: crate::FieldType,
    },

    #[error("point index {index} out of range for cloud of {len} points")]
    PointOutOfRange { index: usize, len: usize },

    #[error("shape {width}x{height} does not match {len} points")]
    ShapeMismatch {
        width: usize,
        height: usize,
        len: usize,
    },
}
