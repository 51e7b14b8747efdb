use crate::core::{errors::IndexError, shape::Shape};
use anyhow::Result;

/// Read-only `(D, outH, outW, C, k, k)` view of every pooling window of a
/// 4D tensor, borrowed from that tensor's buffer.
///
/// Element `(d, i, j, c, ki, kj)` is the source element
/// `(d, i * stride + ki, j * stride + kj, c)`. Overlapping windows share
/// storage, so building the view costs no more than computing six strides.
pub struct WindowView<'a, T> {
    data: &'a [T],
    shape: Shape,
}

impl<'a, T: Copy> WindowView<'a, T> {
    pub(crate) fn new(data: &'a [T], shape: Shape) -> WindowView<'a, T> {
        WindowView { data, shape }
    }

    pub fn sizes(&self) -> &[usize] {
        &self.shape.sizes
    }

    pub fn strides(&self) -> &[usize] {
        &self.shape.strides
    }

    pub fn offset(&self) -> usize {
        self.shape.offset
    }

    /// `(D, outH, outW, C)`, the shape of the pooled output.
    pub fn output_sizes(&self) -> &[usize] {
        &self.shape.sizes[..4]
    }

    pub fn kernel_size(&self) -> usize {
        self.shape.sizes[4]
    }

    pub fn get(&self, indices: &[usize]) -> Result<T> {
        Ok(self.data[self.shape.index(indices)?])
    }

    /// Elements of window `(d, i, j, c)` in row-major order.
    pub fn window(&self, indices: &[usize]) -> Result<Window<'a, T>> {
        let output_sizes = self.output_sizes();

        if indices.len() != output_sizes.len() {
            return Err(IndexError::IndicesLength {
                num_indices: indices.len(),
                num_dimensions: output_sizes.len(),
            }
            .into());
        }

        for (dimension, (&index, &size)) in indices.iter().zip(output_sizes).enumerate() {
            if index >= size {
                return Err(IndexError::OutOfRange {
                    index,
                    dimension,
                    size,
                }
                .into());
            }
        }

        Ok(self.window_at(self.shape.idx(indices)))
    }

    /// Buffer position of the first element of window `(d, i, j, c)`.
    pub(crate) fn window_offset(&self, indices: &[usize]) -> usize {
        self.shape.idx(indices)
    }

    pub(crate) fn window_at(&self, base: usize) -> Window<'a, T> {
        Window {
            data: self.data,
            base,
            kernel_size: self.kernel_size(),
            row_stride: self.shape.strides[4],
            col_stride: self.shape.strides[5],
            position: 0,
        }
    }
}

/// Iterator over the `kernel_size * kernel_size` elements of one window.
pub struct Window<'a, T> {
    data: &'a [T],
    base: usize,
    kernel_size: usize,
    row_stride: usize,
    col_stride: usize,
    position: usize,
}

impl<'a, T: Copy> Iterator for Window<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.position == self.kernel_size * self.kernel_size {
            return None;
        }

        let (ki, kj) = (
            self.position / self.kernel_size,
            self.position % self.kernel_size,
        );
        self.position += 1;

        Some(self.data[self.base + ki * self.row_stride + kj * self.col_stride])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.kernel_size * self.kernel_size - self.position;
        (remaining, Some(remaining))
    }
}

impl<'a, T: Copy> ExactSizeIterator for Window<'a, T> {}
