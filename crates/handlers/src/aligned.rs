use crate::color::{ColorArray, ColorHandler, ColorSampler};
use crate::geometry::{GeometryArray, GeometryHandler};

/// Positions and colors with equal length and index correspondence.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedAttributes {
    pub positions: GeometryArray,
    pub colors: ColorArray,
}

impl AlignedAttributes {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Extracts geometry and color in one pass, keeping a record only when
/// both its position and its color are valid.
///
/// Unlike calling the two `extract` methods separately, a record whose `x`
/// is finite but `y` or `z` is not is dropped from both arrays.
///
/// Returns `None` if either handler is incapable or the two views do not
/// have the same point count.
pub fn extract_aligned(
    geometry: &GeometryHandler<'_>,
    color: &ColorHandler<'_>,
) -> Option<AlignedAttributes> {
    let reader = geometry.reader()?;
    let sampler = color.sampler()?;

    let geometry_cloud = geometry.cloud();
    let color_cloud = color.cloud();
    if geometry_cloud.len() != color_cloud.len() {
        return None;
    }

    let total = geometry_cloud.len();
    let pairs = geometry_cloud.records().zip(color_cloud.records());
    let mut positions = Vec::with_capacity(total);

    let colors = match sampler {
        ColorSampler::Scalar(_) => {
            let mut values = Vec::with_capacity(total);
            for (g, c) in pairs {
                if let (Some(p), Some(v)) = (reader.read(g), sampler.scalar(c)) {
                    positions.push(p);
                    values.push(v);
                }
            }
            ColorArray::Scalar(values)
        }
        ColorSampler::Fixed(_) | ColorSampler::Packed(_) => {
            let mut rgb = Vec::with_capacity(total);
            for (g, c) in pairs {
                if let (Some(p), Some(v)) = (reader.read(g), sampler.rgb(c)) {
                    positions.push(p);
                    rgb.push(v);
                }
            }
            ColorArray::Rgb(rgb)
        }
    };

    log::debug!(
        "aligned {}/{} kept {} of {} points",
        geometry.kind().as_str(),
        color.kind().as_str(),
        positions.len(),
        total
    );

    Some(AlignedAttributes {
        positions: GeometryArray::from(positions),
        colors,
    })
}
