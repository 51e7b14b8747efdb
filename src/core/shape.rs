use crate::core::errors::*;
use anyhow::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Shape {
    pub sizes: Vec<usize>,
    pub strides: Vec<usize>,
    pub offset: usize,
}

impl Shape {
    pub fn new(sizes: &[usize]) -> Shape {
        Shape {
            sizes: sizes.to_vec(),
            strides: contiguous_strides(sizes),
            offset: 0,
        }
    }

    pub(crate) fn rank(&self) -> usize {
        self.sizes.len()
    }

    pub(crate) fn numel(&self) -> usize {
        self.sizes.iter().product()
    }

    // --- Shape operations ---

    pub(crate) fn view(&self, sizes: &[usize]) -> Result<Shape> {
        self.valid_contiguity()?;
        self.valid_reshape(sizes)?;

        Ok(Shape {
            sizes: sizes.to_vec(),
            strides: contiguous_strides(sizes),
            offset: self.offset,
        })
    }

    /// Strided view of every `kernel_size x kernel_size` window of a
    /// `(D, H, W, C)` shape, laid out as `(D, outH, outW, C, kernel_size, kernel_size)`.
    ///
    /// Element `(d, i, j, c, ki, kj)` maps to `(d, i * stride + ki, j * stride + kj, c)`.
    pub(crate) fn window(&self, kernel_size: usize, stride: usize) -> Result<Shape, PoolError> {
        let [batch, out_height, out_width, channels] =
            Shape::window_sizes(&self.sizes, kernel_size, stride)?;
        let &[stride_d, stride_h, stride_w, stride_c] = self.strides.as_slice() else {
            return Err(PoolError::ShapeMismatch {
                sizes: self.sizes.to_vec(),
            });
        };

        Ok(Shape {
            sizes: vec![
                batch,
                out_height,
                out_width,
                channels,
                kernel_size,
                kernel_size,
            ],
            strides: vec![
                stride_d,
                stride * stride_h,
                stride * stride_w,
                stride_c,
                stride_h,
                stride_w,
            ],
            offset: self.offset,
        })
    }

    /// Output sizes of pooling a `(D, H, W, C)` extent. Trailing rows and
    /// columns that do not fill a whole window are dropped.
    pub(crate) fn window_sizes(
        sizes: &[usize],
        kernel_size: usize,
        stride: usize,
    ) -> Result<[usize; 4], PoolError> {
        let &[batch, height, width, channels] = sizes else {
            return Err(PoolError::ShapeMismatch {
                sizes: sizes.to_vec(),
            });
        };

        if kernel_size == 0 {
            return Err(ConfigError::ZeroKernelSize.into());
        }
        if stride == 0 {
            return Err(ConfigError::ZeroStride.into());
        }

        let out_size = |axis: &'static str, extent: usize| {
            extent
                .checked_sub(kernel_size)
                .map(|rest| rest / stride + 1)
                .ok_or(ConfigError::WindowLargerThanInput {
                    axis,
                    extent,
                    kernel_size,
                })
        };

        Ok([
            batch,
            out_size("height", height)?,
            out_size("width", width)?,
            channels,
        ])
    }

    // --- Index, Slice and Pad ---

    pub(crate) fn idx(&self, indices: &[usize]) -> usize {
        self.strides
            .iter()
            .zip(indices)
            .map(|(&stride, &index)| stride * index)
            .sum::<usize>()
            + self.offset
    }

    pub(crate) fn index(&self, indices: &[usize]) -> Result<usize, IndexError> {
        self.valid_indices(indices)?;

        Ok(self.idx(indices))
    }

    pub(crate) fn slice(&self, ranges: &[(usize, usize)]) -> Result<Shape, RangeError> {
        self.valid_ranges(ranges)?;

        let offset = self
            .strides
            .iter()
            .zip(ranges)
            .map(|(&stride, &(start, _))| start * stride)
            .sum::<usize>()
            + self.offset;

        let sizes = ranges.iter().map(|&(start, end)| end - start).collect();

        Ok(Shape {
            sizes,
            strides: self.strides.to_vec(),
            offset,
        })
    }

    pub(crate) fn pad(&self, padding: &[(usize, usize)]) -> Result<Shape, ConfigError> {
        let mut padding = padding.to_vec();
        padding.resize(self.rank(), (0, 0));

        let sizes = self
            .sizes
            .iter()
            .zip(padding)
            .map(|(&size, (start, end))| {
                size.checked_add(start)
                    .and_then(|size| size.checked_add(end))
                    .ok_or(ConfigError::PaddingOverflow)
            })
            .collect::<Result<Vec<usize>, ConfigError>>()?;

        // Strides are products of trailing sizes, so the element count must fit too.
        sizes
            .iter()
            .try_fold(1_usize, |numel, &size| numel.checked_mul(size))
            .ok_or(ConfigError::PaddingOverflow)?;

        Ok(Shape::new(&sizes))
    }

    // --- Validation ---

    pub(crate) fn is_contiguous(&self) -> bool {
        self.strides == contiguous_strides(&self.sizes)
    }

    pub(crate) fn valid_contiguity(&self) -> Result<(), NonContiguousError> {
        if self.is_contiguous() {
            Ok(())
        } else {
            Err(NonContiguousError)
        }
    }

    pub(crate) fn valid_reshape(&self, sizes: &[usize]) -> Result<(), ReshapeError> {
        if self.numel() != sizes.iter().product::<usize>() {
            return Err(ReshapeError {
                current_shape: self.sizes.to_vec(),
                new_shape: sizes.to_vec(),
            });
        }

        Ok(())
    }

    fn valid_indices(&self, indices: &[usize]) -> Result<(), IndexError> {
        if indices.len() != self.rank() {
            return Err(IndexError::IndicesLength {
                num_indices: indices.len(),
                num_dimensions: self.rank(),
            });
        }

        for (dimension, (&index, &size)) in indices.iter().zip(&self.sizes).enumerate() {
            if index >= size {
                return Err(IndexError::OutOfRange {
                    index,
                    dimension,
                    size,
                });
            }
        }

        Ok(())
    }

    fn valid_ranges(&self, ranges: &[(usize, usize)]) -> Result<(), RangeError> {
        if ranges.len() != self.rank() {
            return Err(RangeError::RangesLength {
                num_ranges: ranges.len(),
                num_dimensions: self.rank(),
            });
        }

        for (dimension, (&range, &size)) in ranges.iter().zip(&self.sizes).enumerate() {
            if range.0 > range.1 {
                return Err(RangeError::GreaterStartRange(range.0, range.1));
            } else if range.1 > size {
                return Err(RangeError::OutOfRange {
                    range,
                    dimension,
                    size,
                });
            }
        }

        Ok(())
    }

    pub(crate) fn valid_data_length(
        &self,
        data_length: usize,
    ) -> Result<(), InvalidDataLengthError> {
        let numel = self.numel();

        if data_length != numel {
            Err(InvalidDataLengthError {
                data_length,
                tensor_size: numel,
            })
        } else {
            Ok(())
        }
    }
}

fn contiguous_strides(sizes: &[usize]) -> Vec<usize> {
    let mut current = 1;
    let mut strides = sizes
        .iter()
        .rev()
        .map(|size| {
            let stride = current;
            current *= size;
            stride
        })
        .collect::<Vec<usize>>();
    strides.reverse();

    strides
}

#[cfg(test)]
mod shape_tests {
    use super::*;

    #[test]
    fn row_major_strides() {
        let shape = Shape::new(&[2, 4, 4, 3]);
        assert_eq!(shape.strides, vec![48, 12, 3, 1]);
        assert!(shape.is_contiguous());
    }

    #[test]
    fn window_strides() {
        let shape = Shape::new(&[2, 5, 5, 3]).window(3, 2).unwrap();

        assert_eq!(shape.sizes, vec![2, 2, 2, 3, 3, 3]);
        assert_eq!(shape.strides, vec![75, 30, 6, 1, 15, 3]);
        // (1, 1, 0, 2, 2, 1) -> (1, 4, 1, 2)
        assert_eq!(
            shape.idx(&[1, 1, 0, 2, 2, 1]),
            Shape::new(&[2, 5, 5, 3]).idx(&[1, 4, 1, 2])
        );
    }

    #[test]
    fn window_keeps_offset() {
        let base = Shape::new(&[3, 6, 6, 2]);
        let sliced = base.slice(&[(1, 2), (1, 5), (1, 5), (0, 2)]).unwrap();
        let window = sliced.window(2, 2).unwrap();

        assert_eq!(window.offset, sliced.offset);
        assert_eq!(window.idx(&[0, 1, 1, 1, 1, 1]), base.idx(&[1, 4, 4, 1]));
    }

    #[test]
    fn window_sizes_drop_remainder() {
        assert_eq!(
            Shape::window_sizes(&[1, 7, 6, 1], 2, 2).unwrap(),
            [1, 3, 3, 1]
        );
    }

    #[test]
    fn window_sizes_errors() {
        assert_eq!(
            Shape::window_sizes(&[1, 4, 4, 1], 0, 1),
            Err(PoolError::InvalidConfiguration(ConfigError::ZeroKernelSize))
        );
        assert_eq!(
            Shape::window_sizes(&[1, 4, 4, 1], 2, 0),
            Err(PoolError::InvalidConfiguration(ConfigError::ZeroStride))
        );
        assert_eq!(
            Shape::window_sizes(&[1, 4, 3, 1], 4, 1),
            Err(PoolError::InvalidConfiguration(
                ConfigError::WindowLargerThanInput {
                    axis: "width",
                    extent: 3,
                    kernel_size: 4
                }
            ))
        );
        assert!(matches!(
            Shape::window_sizes(&[4, 4, 1], 2, 2),
            Err(PoolError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn slice_out_of_range() {
        let shape = Shape::new(&[2, 3]);
        assert!(shape.slice(&[(0, 2), (1, 4)]).is_err());
        assert!(shape.slice(&[(2, 1), (0, 3)]).is_err());
        assert!(shape.slice(&[(0, 2)]).is_err());
    }

    #[test]
    fn pad_sizes() {
        let shape = Shape::new(&[1, 2, 3, 4])
            .pad(&[(0, 0), (1, 1), (2, 2)])
            .unwrap();
        assert_eq!(shape.sizes, vec![1, 4, 7, 4]);
    }

    #[test]
    fn pad_overflow() {
        let shape = Shape::new(&[1, 2, 2, 1]);

        assert!(matches!(
            shape.pad(&[(0, 0), (usize::MAX, 0)]),
            Err(ConfigError::PaddingOverflow)
        ));
        assert!(matches!(
            shape.pad(&[(0, 0), (1 << 40, 1 << 40), (1 << 40, 1 << 40)]),
            Err(ConfigError::PaddingOverflow)
        ));
    }
}
