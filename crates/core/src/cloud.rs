use crate::cloud_view::validate_fields;
use crate::{find_field_index, CloudView, FieldDescriptor, FieldType, LayoutError, Rgb};

/// Owned point cloud stored as fixed-stride binary records.
///
/// Unorganized by default (`height == 1`); [`reshape`](Self::reshape)
/// turns it into an organized grid of the same point count.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloudBlob {
    fields: Vec<FieldDescriptor>,
    point_step: usize,
    data: Vec<u8>,
    width: usize,
    height: usize,
    is_dense: bool,
}

impl PointCloudBlob {
    /// Creates an empty cloud with the given record layout.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `point_step` is zero or a field does not fit in it.
    pub fn new(fields: Vec<FieldDescriptor>, point_step: usize) -> Result<Self, LayoutError> {
        validate_fields(&fields, point_step)?;
        Ok(Self {
            fields,
            point_step,
            data: Vec::new(),
            width: 0,
            height: 1,
            is_dense: true,
        })
    }

    /// Layout of consecutive `Float32` fields, one per name, with no padding.
    pub fn packed(names: &[&str]) -> Result<Self, LayoutError> {
        let fields = names
            .iter()
            .enumerate()
            .map(|(i, name)| FieldDescriptor::new(*name, i * 4, FieldType::Float32))
            .collect();
        Self::new(fields, names.len() * 4)
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn point_step(&self) -> usize {
        self.point_step
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_dense(&self) -> bool {
        self.is_dense
    }

    pub fn set_dense(&mut self, is_dense: bool) {
        self.is_dense = is_dense;
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn view(&self) -> CloudView<'_> {
        CloudView::from_validated(
            &self.data,
            &self.fields,
            self.width,
            self.height,
            self.point_step,
            self.is_dense,
        )
    }

    /// Appends a zero-filled record and returns its index.
    ///
    /// The cloud becomes unorganized (`height == 1`).
    pub fn push_zeroed(&mut self) -> usize {
        let index = self.len();
        self.data.resize(self.data.len() + self.point_step, 0);
        self.width = index + 1;
        self.height = 1;
        index
    }

    /// Appends one record, writing each `(field, value)` pair as `f32`.
    ///
    /// Fields not listed stay zero. On error the cloud is left unchanged.
    pub fn push_point(&mut self, values: &[(&str, f32)]) -> Result<usize, LayoutError> {
        for (name, _) in values {
            self.float_field_offset(name)?;
        }
        let index = self.push_zeroed();
        for (name, value) in values {
            self.set_f32(index, name, *value)?;
        }
        Ok(index)
    }

    pub fn set_f32(&mut self, index: usize, field: &str, value: f32) -> Result<(), LayoutError> {
        let offset = self.float_field_offset(field)?;
        let len = self.len();
        if index >= len {
            return Err(LayoutError::PointOutOfRange { index, len });
        }
        let base = index * self.point_step + offset;
        self.data[base..base + 4].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Stores `color` in the `rgb` field using the packed-float convention.
    pub fn set_rgb(&mut self, index: usize, color: Rgb) -> Result<(), LayoutError> {
        self.set_f32(index, "rgb", color.to_packed_f32())
    }

    /// Reinterprets the records as a `width x height` organized grid.
    pub fn reshape(&mut self, width: usize, height: usize) -> Result<(), LayoutError> {
        let len = self.len();
        if width.checked_mul(height) != Some(len) {
            return Err(LayoutError::ShapeMismatch { width, height, len });
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn float_field_offset(&self, name: &str) -> Result<usize, LayoutError> {
        let idx = find_field_index(&self.fields, name)
            .ok_or_else(|| LayoutError::UnknownField(name.to_string()))?;
        let field = &self.fields[idx];
        if field.datatype != FieldType::Float32 {
            return Err(LayoutError::NotFloat32 {
                name: field.name.clone(),
                datatype: field.datatype,
            });
        }
        Ok(field.offset)
    }
}
