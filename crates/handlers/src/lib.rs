#![forbid(unsafe_code)]

pub mod aligned;
pub mod color;
pub mod config;
pub mod geometry;

pub use aligned::{extract_aligned, AlignedAttributes};
pub use color::{ColorArray, ColorHandler, ColorKind};
pub use config::{ColorHandlerConfig, GeometryHandlerConfig, LayerConfig};
pub use geometry::{GeometryArray, GeometryHandler, GeometryKind};
pub use pointattrs_core::AttributeHandler;
