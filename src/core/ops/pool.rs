use crate::{
    core::config::{PoolConfig, PoolMode},
    Tensor,
};
use anyhow::Result;
use num_traits::{Float, FromPrimitive};
use tracing::debug;

impl<T> Tensor<T>
where
    T: Float + FromPrimitive + Send + Sync,
{
    /// Max or average pooling of a `(D, H, W, C)` tensor over square windows.
    ///
    /// The configuration is validated against the input before anything is
    /// padded or reduced. Windows are read through a strided view of the
    /// padded buffer; only the output is freshly allocated (plus the padded
    /// copy when `padding > 0`). Padding zeros take part in both reductions,
    /// so an average is always over `kernel_size * kernel_size` elements.
    pub fn pool_2d(&self, config: &PoolConfig) -> Result<Tensor<T>> {
        let output_sizes = config.validate(self.sizes())?;
        debug!(
            input = ?self.sizes(),
            output = ?output_sizes,
            kernel_size = config.kernel_size,
            stride = config.stride,
            padding = config.padding,
            scope = ?config.scope,
            mode = %config.mode,
            "pool_2d"
        );

        let padded = if config.padding == 0 {
            self.clone()
        } else {
            self.pad(T::zero(), &config.padding())?
        };
        let windows = padded.windows(config.kernel_size, config.stride)?;

        match config.mode {
            PoolMode::Max => Ok(windows.max()),
            PoolMode::Avg => windows.mean(),
        }
    }

    pub fn max_pool_2d(&self, kernel_size: usize, stride: usize, padding: usize) -> Result<Tensor<T>> {
        self.pool_2d(&PoolConfig::new(kernel_size, stride, padding, PoolMode::Max))
    }

    pub fn avg_pool_2d(&self, kernel_size: usize, stride: usize, padding: usize) -> Result<Tensor<T>> {
        self.pool_2d(&PoolConfig::new(kernel_size, stride, padding, PoolMode::Avg))
    }
}

/// Pools `input` with a mode given by name, `"max"` or `"avg"`.
///
/// ```
/// use stridepool::{pool2d, Tensor};
///
/// let input = Tensor::arange(0.0, 16.0, 1.0)?.view(&[1, 4, 4, 1])?;
/// let output = pool2d(&input, 2, 2, 0, "max")?;
///
/// assert_eq!(output.sizes(), &[1, 2, 2, 1]);
/// assert_eq!(output.data().to_vec(), vec![5.0, 7.0, 13.0, 15.0]);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn pool2d<T>(
    input: &Tensor<T>,
    kernel_size: usize,
    stride: usize,
    padding: usize,
    pool_mode: &str,
) -> Result<Tensor<T>>
where
    T: Float + FromPrimitive + Send + Sync,
{
    let mode = pool_mode.parse::<PoolMode>()?;
    input.pool_2d(&PoolConfig::new(kernel_size, stride, padding, mode))
}
