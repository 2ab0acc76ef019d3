//! Declarative handler selection.
//!
//! ```toml
//! [geometry]
//! type = "custom"
//! x = "u"
//! y = "v"
//! z = "w"
//!
//! [color]
//! type = "generic_field"
//! field = "intensity"
//! ```

use pointattrs_core::{CloudView, Rgb};
use serde::{Deserialize, Serialize};

use crate::{ColorHandler, GeometryHandler};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColorHandlerConfig {
    Custom {
        r: u8,
        g: u8,
        b: u8,
    },
    #[default]
    Random,
    RgbField,
    GenericField {
        field: String,
    },
}

impl ColorHandlerConfig {
    pub fn build<'a>(&self, cloud: CloudView<'a>) -> ColorHandler<'a> {
        match self {
            ColorHandlerConfig::Custom { r, g, b } => {
                ColorHandler::custom(cloud, Rgb::new(*r, *g, *b))
            }
            ColorHandlerConfig::Random => ColorHandler::random(cloud),
            ColorHandlerConfig::RgbField => ColorHandler::rgb_field(cloud),
            ColorHandlerConfig::GenericField { field } => ColorHandler::generic_field(cloud, field),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeometryHandlerConfig {
    #[default]
    Xyz,
    SurfaceNormal,
    Custom {
        x: String,
        y: String,
        z: String,
    },
}

impl GeometryHandlerConfig {
    pub fn build<'a>(&self, cloud: CloudView<'a>) -> GeometryHandler<'a> {
        match self {
            GeometryHandlerConfig::Xyz => GeometryHandler::xyz(cloud),
            GeometryHandlerConfig::SurfaceNormal => GeometryHandler::surface_normal(cloud),
            GeometryHandlerConfig::Custom { x, y, z } => GeometryHandler::custom(cloud, x, y, z),
        }
    }
}

/// A geometry/color handler pair for one rendered cloud.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    pub geometry: GeometryHandlerConfig,
    pub color: ColorHandlerConfig,
}

impl LayerConfig {
    pub fn build<'a>(&self, cloud: CloudView<'a>) -> (GeometryHandler<'a>, ColorHandler<'a>) {
        (self.geometry.build(cloud), self.color.build(cloud))
    }
}
