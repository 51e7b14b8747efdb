use crate::core::{
    errors::{ConfigError, PoolError},
    shape::Shape,
};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolMode {
    Max,
    Avg,
}

/// Which axes receive the `padding` zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaddingScope {
    /// Height and width only, as pooling layers usually pad.
    #[default]
    Spatial,
    /// Every axis, batch and channel included. Output batch and channel
    /// extents grow by `2 * padding`.
    AllAxes,
}

/// Square-window pooling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub kernel_size: usize,
    pub stride: usize,
    pub padding: usize,
    pub mode: PoolMode,
    pub scope: PaddingScope,
}

impl PoolConfig {
    pub fn new(kernel_size: usize, stride: usize, padding: usize, mode: PoolMode) -> PoolConfig {
        PoolConfig {
            kernel_size,
            stride,
            padding,
            mode,
            scope: PaddingScope::default(),
        }
    }

    pub fn with_padding_scope(self, scope: PaddingScope) -> PoolConfig {
        PoolConfig { scope, ..self }
    }

    /// `(before, after)` zero counts per axis of a `(D, H, W, C)` tensor.
    pub(crate) fn padding(&self) -> [(usize, usize); 4] {
        let p = (self.padding, self.padding);

        match self.scope {
            PaddingScope::Spatial => [(0, 0), p, p, (0, 0)],
            PaddingScope::AllAxes => [p; 4],
        }
    }

    pub fn padded_sizes(&self, sizes: &[usize]) -> Result<Vec<usize>, PoolError> {
        Ok(Shape::new(sizes).pad(&self.padding())?.sizes)
    }

    /// Checks `self` against input `sizes` and returns the pooled output sizes.
    pub fn validate(&self, sizes: &[usize]) -> Result<[usize; 4], PoolError> {
        if sizes.len() != 4 || sizes.contains(&0) {
            return Err(PoolError::ShapeMismatch {
                sizes: sizes.to_vec(),
            });
        }
        if self.kernel_size == 0 {
            return Err(ConfigError::ZeroKernelSize.into());
        }
        if self.stride == 0 {
            return Err(ConfigError::ZeroStride.into());
        }

        Shape::window_sizes(&self.padded_sizes(sizes)?, self.kernel_size, self.stride)
    }
}

impl FromStr for PoolMode {
    type Err = PoolError;

    fn from_str(s: &str) -> Result<PoolMode, PoolError> {
        match s {
            "max" => Ok(PoolMode::Max),
            "avg" => Ok(PoolMode::Avg),
            other => Err(PoolError::UnsupportedMode(other.to_string())),
        }
    }
}

impl fmt::Display for PoolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolMode::Max => write!(f, "max"),
            PoolMode::Avg => write!(f, "avg"),
        }
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn parse_mode() {
        assert_eq!("max".parse::<PoolMode>(), Ok(PoolMode::Max));
        assert_eq!("avg".parse::<PoolMode>(), Ok(PoolMode::Avg));
        assert_eq!(
            "mean".parse::<PoolMode>(),
            Err(PoolError::UnsupportedMode("mean".to_string()))
        );
        assert!("MAX".parse::<PoolMode>().is_err());
        assert_eq!(PoolMode::Avg.to_string(), "avg");
    }

    #[test]
    fn default_scope_is_spatial() {
        let config = PoolConfig::new(2, 2, 1, PoolMode::Max);

        assert_eq!(config.scope, PaddingScope::Spatial);
        assert_eq!(config.padded_sizes(&[2, 4, 4, 3]), Ok(vec![2, 6, 6, 3]));
    }

    #[test]
    fn all_axes_padding() {
        let config =
            PoolConfig::new(2, 2, 1, PoolMode::Max).with_padding_scope(PaddingScope::AllAxes);

        assert_eq!(config.padded_sizes(&[2, 4, 4, 3]), Ok(vec![4, 6, 6, 5]));
        assert_eq!(config.validate(&[2, 4, 4, 3]), Ok([4, 3, 3, 5]));
    }

    #[test]
    fn padding_overflow() {
        let config = PoolConfig::new(2, 2, usize::MAX / 2 + 1, PoolMode::Max);
        let overflow: Result<[usize; 4], PoolError> =
            Err(PoolError::InvalidConfiguration(ConfigError::PaddingOverflow));

        assert_eq!(config.validate(&[1, 2, 2, 1]), overflow);
        assert_eq!(
            config
                .with_padding_scope(PaddingScope::AllAxes)
                .validate(&[1, 2, 2, 1]),
            overflow
        );
    }

    #[test]
    fn validate_output_sizes() {
        let config = PoolConfig::new(3, 2, 1, PoolMode::Avg);
        // (5 + 2 - 3) / 2 + 1 = 3, (6 + 2 - 3) / 2 + 1 = 3
        assert_eq!(config.validate(&[1, 5, 6, 2]), Ok([1, 3, 3, 2]));
    }

    #[test]
    fn validate_errors() {
        let config = PoolConfig::new(5, 1, 0, PoolMode::Max);
        assert_eq!(
            config.validate(&[1, 4, 4, 1]),
            Err(PoolError::InvalidConfiguration(
                ConfigError::WindowLargerThanInput {
                    axis: "height",
                    extent: 4,
                    kernel_size: 5,
                }
            ))
        );

        // Padding can make room for the window.
        let padded = PoolConfig { padding: 1, ..config };
        assert_eq!(padded.validate(&[1, 4, 4, 1]), Ok([1, 2, 2, 1]));

        assert_eq!(
            PoolConfig::new(0, 1, 0, PoolMode::Max).validate(&[1, 4, 4, 1]),
            Err(PoolError::InvalidConfiguration(ConfigError::ZeroKernelSize))
        );
        assert_eq!(
            PoolConfig::new(2, 0, 0, PoolMode::Max).validate(&[1, 4, 4, 1]),
            Err(PoolError::InvalidConfiguration(ConfigError::ZeroStride))
        );
        assert_eq!(
            config.validate(&[4, 4, 1]),
            Err(PoolError::ShapeMismatch {
                sizes: vec![4, 4, 1]
            })
        );
        assert!(matches!(
            config.validate(&[1, 0, 4, 1]),
            Err(PoolError::ShapeMismatch { .. })
        ));
    }
}
