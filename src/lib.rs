#![forbid(unsafe_code)]

//! Facade over the `pointattrs` workspace crates.

pub use pointattrs_core::{
    find_field_index, random_color, CloudView, FieldDescriptor, FieldType, LayoutError,
    PointCloudBlob, Rgb,
};
pub use pointattrs_handlers::{
    extract_aligned, AlignedAttributes, AttributeHandler, ColorArray, ColorHandler,
    ColorHandlerConfig, ColorKind, GeometryArray, GeometryHandler, GeometryHandlerConfig,
    GeometryKind, LayerConfig,
};
