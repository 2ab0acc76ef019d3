use std::ops::Deref;

use pointattrs_core::{read_f32, AttributeHandler, CloudView};

/// Which field triple a [`GeometryHandler`] reads positions from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// `x`, `y`, `z`.
    Xyz,
    /// `normal_x`, `normal_y`, `normal_z`.
    SurfaceNormal,
    /// Three caller-chosen field names.
    Custom,
}

impl GeometryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GeometryKind::Xyz => "xyz",
            GeometryKind::SurfaceNormal => "surface_normal",
            GeometryKind::Custom => "custom_xyz",
        }
    }
}

/// Extracts per-point 3-D positions from a cloud.
///
/// Field indices are resolved once in the constructor; the handler is
/// capable only if all three resolved.
#[derive(Debug, Clone)]
pub struct GeometryHandler<'a> {
    cloud: CloudView<'a>,
    kind: GeometryKind,
    field_name: String,
    field_indices: Option<[usize; 3]>,
}

impl<'a> GeometryHandler<'a> {
    pub fn xyz(cloud: CloudView<'a>) -> Self {
        Self::resolve(cloud, GeometryKind::Xyz, ["x", "y", "z"], "xyz".to_string())
    }

    pub fn surface_normal(cloud: CloudView<'a>) -> Self {
        Self::resolve(
            cloud,
            GeometryKind::SurfaceNormal,
            ["normal_x", "normal_y", "normal_z"],
            "normal_xyz".to_string(),
        )
    }

    /// Reads positions from three arbitrary fields.
    ///
    /// The field name is the concatenation of the three names, and stays
    /// empty when any of them is missing.
    pub fn custom(cloud: CloudView<'a>, x_field: &str, y_field: &str, z_field: &str) -> Self {
        Self::resolve(
            cloud,
            GeometryKind::Custom,
            [x_field, y_field, z_field],
            format!("{x_field}{y_field}{z_field}"),
        )
    }

    fn resolve(
        cloud: CloudView<'a>,
        kind: GeometryKind,
        names: [&str; 3],
        field_name: String,
    ) -> Self {
        let field_indices = resolve_triple(&cloud, names);

        let field_name = match (kind, field_indices) {
            (GeometryKind::Custom, None) => String::new(),
            _ => field_name,
        };

        Self {
            cloud,
            kind,
            field_name,
            field_indices,
        }
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn cloud(&self) -> CloudView<'a> {
        self.cloud
    }

    pub fn field_indices(&self) -> Option<[usize; 3]> {
        self.field_indices
    }

    pub(crate) fn reader(&self) -> Option<TripleReader> {
        let fields = self.cloud.fields();
        self.field_indices.map(|[ix, iy, iz]| TripleReader {
            offsets: [fields[ix].offset, fields[iy].offset, fields[iz].offset],
            dense: self.cloud.is_dense(),
        })
    }

    /// Extracts one position per valid record, in record order.
    ///
    /// Dense clouds are copied unconditionally. Otherwise a record is
    /// dropped as a whole if any of its three coordinates is non-finite.
    pub fn extract(&self) -> Option<GeometryArray> {
        let reader = self.reader()?;
        let total = self.cloud.len();

        let mut points = Vec::with_capacity(total);
        points.extend(self.cloud.records().filter_map(|record| reader.read(record)));

        if !reader.dense {
            log::debug!(
                "{} geometry kept {} of {} points",
                self.kind.as_str(),
                points.len(),
                total
            );
        }

        Some(GeometryArray { points })
    }
}

impl AttributeHandler for GeometryHandler<'_> {
    type Output = GeometryArray;

    fn name(&self) -> &str {
        self.kind.as_str()
    }

    fn field_name(&self) -> &str {
        &self.field_name
    }

    fn is_capable(&self) -> bool {
        self.field_indices.is_some()
    }

    fn extract(&self) -> Option<GeometryArray> {
        GeometryHandler::extract(self)
    }
}

fn resolve_triple(cloud: &CloudView<'_>, [x, y, z]: [&str; 3]) -> Option<[usize; 3]> {
    Some([
        cloud.field_index(x)?,
        cloud.field_index(y)?,
        cloud.field_index(z)?,
    ])
}

/// Decodes a coordinate triple from a record at fixed byte offsets.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TripleReader {
    offsets: [usize; 3],
    dense: bool,
}

impl TripleReader {
    #[inline]
    pub(crate) fn read(&self, record: &[u8]) -> Option<[f32; 3]> {
        let [ox, oy, oz] = self.offsets;
        if self.dense {
            return Some([
                read_f32(record, ox),
                read_f32(record, oy),
                read_f32(record, oz),
            ]);
        }

        let x = read_f32(record, ox);
        if !x.is_finite() {
            return None;
        }
        let y = read_f32(record, oy);
        if !y.is_finite() {
            return None;
        }
        let z = read_f32(record, oz);
        if !z.is_finite() {
            return None;
        }
        Some([x, y, z])
    }
}

/// Contiguous positions ready for upload as `float[3N]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryArray {
    points: Vec<[f32; 3]>,
}

impl GeometryArray {
    /// Interleaved `x0 y0 z0 x1 y1 z1 ...` view.
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }

    pub fn into_inner(self) -> Vec<[f32; 3]> {
        self.points
    }
}

impl Deref for GeometryArray {
    type Target = [[f32; 3]];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl From<Vec<[f32; 3]>> for GeometryArray {
    fn from(points: Vec<[f32; 3]>) -> Self {
        Self { points }
    }
}
