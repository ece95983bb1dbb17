use bytemuck::Pod;

use crate::errors::{Error, Result};

/// Little-endian cursor over a byte slice.
///
/// Every read is bounds-checked up front and fails with
/// [`Error::FormatMismatch`] instead of reading past the end.
#[derive(Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> ByteReader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }

    /// Starts reading at `cursor` (clamped to the buffer length).
    #[must_use]
    pub fn at(data: &'a [u8], cursor: usize) -> Self {
        Self {
            data,
            cursor: cursor.min(data.len()),
        }
    }

    #[inline]
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// Fails unless `size` more bytes are available.
    pub fn ensure(&self, size: usize, context: &'static str) -> Result<()> {
        if size > self.remaining() {
            return Err(Error::FormatMismatch {
                context,
                needed: size,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    pub fn read_bytes(&mut self, size: usize, context: &'static str) -> Result<&'a [u8]> {
        self.ensure(size, context)?;
        let result = &self.data[self.cursor..self.cursor + size];
        self.cursor += size;
        Ok(result)
    }

    fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N, context)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u32_le(&mut self, context: &'static str) -> Result<u32> {
        self.read_array(context).map(u32::from_le_bytes)
    }

    pub fn read_f32_le(&mut self, context: &'static str) -> Result<f32> {
        self.read_array(context).map(f32::from_le_bytes)
    }

    pub fn read_f64_le(&mut self, context: &'static str) -> Result<f64> {
        self.read_array(context).map(f64::from_le_bytes)
    }

    /// Reads `count` values of `T`, checking the whole span before decoding.
    fn read_vec<T: Pod, const N: usize>(
        &mut self,
        count: usize,
        context: &'static str,
        decode: fn([u8; N]) -> T,
    ) -> Result<Vec<T>> {
        let size = count.checked_mul(N).ok_or(Error::FormatMismatch {
            context,
            needed: usize::MAX,
            available: self.remaining(),
        })?;
        let bytes = self.read_bytes(size, context)?;

        // Little-endian hosts share the file layout.
        if cfg!(target_endian = "little") {
            return Ok(bytemuck::pod_collect_to_vec(bytes));
        }

        Ok(bytes
            .chunks_exact(N)
            .map(|chunk| {
                let mut raw = [0u8; N];
                raw.copy_from_slice(chunk);
                decode(raw)
            })
            .collect())
    }

    pub fn read_u32_vec(&mut self, count: usize, context: &'static str) -> Result<Vec<u32>> {
        self.read_vec::<u32, 4>(count, context, u32::from_le_bytes)
    }

    pub fn read_f32_vec(&mut self, count: usize, context: &'static str) -> Result<Vec<f32>> {
        self.read_vec::<f32, 4>(count, context, f32::from_le_bytes)
    }

    pub fn read_f64_vec(&mut self, count: usize, context: &'static str) -> Result<Vec<f64>> {
        self.read_vec::<f64, 8>(count, context, f64::from_le_bytes)
    }
}

/// Growable little-endian output buffer.
#[derive(Default)]
pub struct ByteWriter {
    data: Vec<u8>,
}

impl ByteWriter {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub fn write_u32_le(&mut self, value: u32) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f64_le(&mut self, value: f64) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    fn write_slice<T: Pod, const N: usize>(&mut self, values: &[T], encode: fn(T) -> [u8; N]) {
        if cfg!(target_endian = "little") {
            self.data.extend_from_slice(bytemuck::cast_slice(values));
            return;
        }
        for &v in values {
            self.data.extend_from_slice(&encode(v));
        }
    }

    pub fn write_u32_slice(&mut self, values: &[u32]) {
        self.write_slice(values, u32::to_le_bytes);
    }

    pub fn write_f32_slice(&mut self, values: &[f32]) {
        self.write_slice(values, f32::to_le_bytes);
    }

    pub fn write_f64_slice(&mut self, values: &[f64]) {
        self.write_slice(values, f64::to_le_bytes);
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}
