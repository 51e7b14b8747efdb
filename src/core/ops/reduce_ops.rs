use crate::{
    core::{utils::cast_usize, view::Window},
    Tensor, WindowView,
};
use anyhow::Result;
use num_traits::{Float, FromPrimitive, Zero};
use rayon::prelude::*;

impl<'a, T> WindowView<'a, T>
where
    T: Copy + Zero + Send + Sync,
{
    /// Reduces every window to a single value, producing a contiguous
    /// `(D, outH, outW, C)` tensor. Output rows `(d, i)` are filled in parallel.
    pub fn reduce<F>(&self, f: F) -> Tensor<T>
    where
        F: Fn(Window<'a, T>) -> T + Sync,
    {
        let sizes = self.output_sizes().to_vec();
        let (out_height, channels) = (sizes[1], sizes[3]);
        let row_length = sizes[2] * channels;

        let mut data = vec![T::zero(); sizes.iter().product()];
        data.par_chunks_mut(row_length.max(1))
            .enumerate()
            .for_each(|(row, chunk)| {
                let (d, i) = (row / out_height, row % out_height);

                for (position, value) in chunk.iter_mut().enumerate() {
                    let (j, c) = (position / channels, position % channels);
                    let base = self.window_offset(&[d, i, j, c]);
                    *value = f(self.window_at(base));
                }
            });

        Tensor::init(data, &sizes)
    }
}

impl<'a, T> WindowView<'a, T>
where
    T: Float + FromPrimitive + Send + Sync,
{
    pub fn max(&self) -> Tensor<T> {
        self.reduce(window_max)
    }

    pub fn mean(&self) -> Result<Tensor<T>> {
        let kernel_size = self.kernel_size();
        let count: T = cast_usize(kernel_size * kernel_size)?;

        Ok(self.reduce(|window| window_sum(window) / count))
    }
}

// NaN propagates: once seen it is never replaced.
fn window_max<T: Float>(window: Window<'_, T>) -> T {
    window.fold(T::neg_infinity(), |max, elem| {
        if elem > max || elem.is_nan() {
            elem
        } else {
            max
        }
    })
}

fn window_sum<T: Float>(window: Window<'_, T>) -> T {
    window.fold(T::zero(), |sum, elem| sum + elem)
}
