use pointattrs_core::{random_color, read_f32, AttributeHandler, CloudView, Rgb};
use rand::Rng;

/// The color handler variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorKind {
    /// One fixed color for every point.
    Custom,
    /// One random color, drawn at construction, for every point.
    Random,
    /// Per-point color decoded from the packed `rgb` field.
    RgbField,
    /// Per-point scalar read from a named field.
    GenericField,
}

impl ColorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorKind::Custom => "custom",
            ColorKind::Random => "random",
            ColorKind::RgbField => "rgb_field",
            ColorKind::GenericField => "generic_field",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ColorSource {
    Fixed(Rgb),
    Packed { field_idx: Option<usize> },
    Scalar { field_idx: Option<usize> },
}

/// Produces a per-point color (`[u8; 3]`) or scalar (`f32`) array.
///
/// Field-based variants skip records whose value is non-finite, and also
/// records whose `x` is non-finite when the cloud has an `x` field.
#[derive(Debug, Clone)]
pub struct ColorHandler<'a> {
    cloud: CloudView<'a>,
    kind: ColorKind,
    field_name: String,
    source: ColorSource,
    capable: bool,
}

impl<'a> ColorHandler<'a> {
    pub fn custom(cloud: CloudView<'a>, color: Rgb) -> Self {
        Self::new(cloud, ColorKind::Custom, String::new(), ColorSource::Fixed(color))
    }

    /// Random color from the calling thread's generator.
    pub fn random(cloud: CloudView<'a>) -> Self {
        Self::random_with_rng(cloud, &mut rand::thread_rng())
    }

    pub fn random_with_rng<R: Rng>(cloud: CloudView<'a>, rng: &mut R) -> Self {
        let color = random_color(rng);
        Self::new(
            cloud,
            ColorKind::Random,
            "[random]".to_string(),
            ColorSource::Fixed(color),
        )
    }

    pub fn rgb_field(cloud: CloudView<'a>) -> Self {
        let field_idx = cloud.field_index("rgb");
        Self::new(
            cloud,
            ColorKind::RgbField,
            "rgb".to_string(),
            ColorSource::Packed { field_idx },
        )
    }

    pub fn generic_field(cloud: CloudView<'a>, field_name: &str) -> Self {
        let field_idx = cloud.field_index(field_name);
        Self::new(
            cloud,
            ColorKind::GenericField,
            field_name.to_string(),
            ColorSource::Scalar { field_idx },
        )
    }

    fn new(cloud: CloudView<'a>, kind: ColorKind, field_name: String, source: ColorSource) -> Self {
        let capable = match source {
            ColorSource::Fixed(_) => true,
            ColorSource::Packed { field_idx } | ColorSource::Scalar { field_idx } => {
                field_idx.is_some()
            }
        };
        Self {
            cloud,
            kind,
            field_name,
            source,
            capable,
        }
    }

    pub fn kind(&self) -> ColorKind {
        self.kind
    }

    pub fn cloud(&self) -> CloudView<'a> {
        self.cloud
    }

    /// The fixed color of a Custom or Random handler.
    pub fn color(&self) -> Option<Rgb> {
        match self.source {
            ColorSource::Fixed(color) => Some(color),
            _ => None,
        }
    }

    /// True if `extract` yields scalars rather than colors.
    pub fn is_scalar(&self) -> bool {
        matches!(self.source, ColorSource::Scalar { .. })
    }

    pub(crate) fn sampler(&self) -> Option<ColorSampler> {
        if !self.capable {
            return None;
        }
        let offset = |idx: usize| self.cloud.fields()[idx].offset;
        match self.source {
            ColorSource::Fixed(color) => Some(ColorSampler::Fixed(color.to_array())),
            ColorSource::Packed { field_idx } => field_idx.map(|i| ColorSampler::Packed(offset(i))),
            ColorSource::Scalar { field_idx } => field_idx.map(|i| ColorSampler::Scalar(offset(i))),
        }
    }

    /// Extracts the color or scalar array.
    ///
    /// Fixed-color variants emit exactly one entry per point. Field variants
    /// emit one entry per included record, in record order.
    pub fn extract(&self) -> Option<ColorArray> {
        let sampler = self.sampler()?;
        let total = self.cloud.len();
        let x_offset = self.cloud.field_offset("x");
        let x_ok = |record: &[u8]| x_offset.map_or(true, |o| read_f32(record, o).is_finite());

        let array = match sampler {
            ColorSampler::Fixed(color) => return Some(ColorArray::Rgb(vec![color; total])),
            ColorSampler::Packed(_) => {
                let mut colors = Vec::with_capacity(total);
                colors.extend(
                    self.cloud
                        .records()
                        .filter_map(|r| sampler.rgb(r).filter(|_| x_ok(r))),
                );
                ColorArray::Rgb(colors)
            }
            ColorSampler::Scalar(_) => {
                let mut values = Vec::with_capacity(total);
                values.extend(
                    self.cloud
                        .records()
                        .filter_map(|r| sampler.scalar(r).filter(|_| x_ok(r))),
                );
                ColorArray::Scalar(values)
            }
        };

        log::debug!(
            "{} color handler on `{}` kept {} of {} points",
            self.kind.as_str(),
            self.field_name,
            array.len(),
            total
        );
        Some(array)
    }
}

impl AttributeHandler for ColorHandler<'_> {
    type Output = ColorArray;

    fn name(&self) -> &str {
        self.kind.as_str()
    }

    fn field_name(&self) -> &str {
        &self.field_name
    }

    fn is_capable(&self) -> bool {
        self.capable
    }

    fn extract(&self) -> Option<ColorArray> {
        ColorHandler::extract(self)
    }
}

/// Per-record color decoding with field offsets already resolved.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ColorSampler {
    Fixed([u8; 3]),
    Packed(usize),
    Scalar(usize),
}

impl ColorSampler {
    /// Color of one record, or `None` if its packed value is non-finite.
    #[inline]
    pub(crate) fn rgb(&self, record: &[u8]) -> Option<[u8; 3]> {
        match *self {
            ColorSampler::Fixed(color) => Some(color),
            ColorSampler::Packed(offset) => {
                let packed = read_f32(record, offset);
                packed
                    .is_finite()
                    .then(|| Rgb::from_packed_f32(packed).to_array())
            }
            ColorSampler::Scalar(_) => None,
        }
    }

    #[inline]
    pub(crate) fn scalar(&self, record: &[u8]) -> Option<f32> {
        match *self {
            ColorSampler::Scalar(offset) => {
                let value = read_f32(record, offset);
                value.is_finite().then_some(value)
            }
            _ => None,
        }
    }
}

/// Output of a [`ColorHandler`].
#[derive(Debug, Clone, PartialEq)]
pub enum ColorArray {
    /// `uint8[3N]` colors.
    Rgb(Vec<[u8; 3]>),
    /// `float[N]` scalars, for lookup-table coloring downstream.
    Scalar(Vec<f32>),
}

impl ColorArray {
    pub fn len(&self) -> usize {
        match self {
            ColorArray::Rgb(c) => c.len(),
            ColorArray::Scalar(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Components per element: 3 for colors, 1 for scalars.
    pub fn components(&self) -> usize {
        match self {
            ColorArray::Rgb(_) => 3,
            ColorArray::Scalar(_) => 1,
        }
    }

    pub fn as_rgb(&self) -> Option<&[[u8; 3]]> {
        match self {
            ColorArray::Rgb(c) => Some(c),
            ColorArray::Scalar(_) => None,
        }
    }

    pub fn as_scalars(&self) -> Option<&[f32]> {
        match self {
            ColorArray::Scalar(s) => Some(s),
            ColorArray::Rgb(_) => None,
        }
    }

    /// Raw bytes for upload, in native endianness for scalars.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ColorArray::Rgb(c) => bytemuck::cast_slice(c),
            ColorArray::Scalar(s) => bytemuck::cast_slice(s),
        }
    }
}
