use crate::{find_field_index, FieldDescriptor, LayoutError};

/// Borrowed, read-only view of a point cloud record buffer.
///
/// The buffer holds `width * height` records of `point_step` bytes each.
/// Every field lies inside the stride; `new` checks that once so record
/// access never has to.
#[derive(Debug, Clone, Copy)]
pub struct CloudView<'a> {
    data: &'a [u8],
    fields: &'a [FieldDescriptor],
    width: usize,
    height: usize,
    point_step: usize,
    is_dense: bool,
}

impl<'a> CloudView<'a> {
    pub fn new(
        data: &'a [u8],
        fields: &'a [FieldDescriptor],
        width: usize,
        height: usize,
        point_step: usize,
        is_dense: bool,
    ) -> Result<Self, LayoutError> {
        validate_fields(fields, point_step)?;

        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(point_step))
            .ok_or(LayoutError::Overflow)?;
        if data.len() != expected {
            return Err(LayoutError::DataLength {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self::from_validated(
            data, fields, width, height, point_step, is_dense,
        ))
    }

    /// Builds a view over a layout the caller has already checked.
    pub(crate) fn from_validated(
        data: &'a [u8],
        fields: &'a [FieldDescriptor],
        width: usize,
        height: usize,
        point_step: usize,
        is_dense: bool,
    ) -> Self {
        debug_assert_eq!(data.len(), point_step * width * height);
        Self {
            data,
            fields,
            width,
            height,
            point_step,
            is_dense,
        }
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn point_step(&self) -> usize {
        self.point_step
    }

    /// True when the producer guarantees no record holds a non-finite value.
    pub fn is_dense(&self) -> bool {
        self.is_dense
    }

    pub fn fields(&self) -> &'a [FieldDescriptor] {
        self.fields
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        find_field_index(self.fields, name)
    }

    /// Byte offset of the named field inside a record.
    pub fn field_offset(&self, name: &str) -> Option<usize> {
        self.field_index(name).map(|idx| self.fields[idx].offset)
    }

    /// Bytes of record `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`. Use [`get`](Self::get) for a checked lookup.
    pub fn record(&self, i: usize) -> &'a [u8] {
        assert!(i < self.len(), "index out of bounds");
        let base = i * self.point_step;
        &self.data[base..base + self.point_step]
    }

    pub fn get(&self, i: usize) -> Option<&'a [u8]> {
        (i < self.len()).then(|| self.record(i))
    }

    /// Iterates records in storage order, stepping `point_step` bytes at a time.
    pub fn records(&self) -> impl Iterator<Item = &'a [u8]> + 'a {
        self.data.chunks_exact(self.point_step).take(self.len())
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}

pub(crate) fn validate_fields(
    fields: &[FieldDescriptor],
    point_step: usize,
) -> Result<(), LayoutError> {
    if point_step == 0 {
        return Err(LayoutError::ZeroStride);
    }

    for field in fields {
        let end = field.end().ok_or(LayoutError::Overflow)?;
        if end > point_step {
            return Err(LayoutError::FieldOutOfBounds {
                name: field.name.clone(),
                offset: field.offset,
                end,
                point_step,
            });
        }
    }
    Ok(())
}
