#![forbid(unsafe_code)]

pub mod cloud;
pub mod cloud_view;
pub mod color;
pub mod error;
pub mod field;
pub mod traits;

pub use cloud::PointCloudBlob;
pub use cloud_view::CloudView;
pub use color::{random_color, random_unit_color, Rgb};
pub use error::LayoutError;
pub use field::{find_field_index, read_f32, FieldDescriptor, FieldType};
pub use traits::AttributeHandler;
