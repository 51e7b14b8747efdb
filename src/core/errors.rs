use thiserror::Error;

// --- Shape ---

#[derive(Error, Debug)]
#[error("Data length ({data_length}) does not match size of tensor ({tensor_size}).")]
pub(crate) struct InvalidDataLengthError {
    pub data_length: usize,
    pub tensor_size: usize,
}

#[derive(Error, Debug)]
#[error("Tensor of shape {current_shape:?} cannot be viewed as {new_shape:?}.")]
pub(crate) struct ReshapeError {
    pub current_shape: Vec<usize>,
    pub new_shape: Vec<usize>,
}

#[derive(Error, Debug)]
#[error("Shape is not contiguous. Use `to_contiguous()` first.")]
pub(crate) struct NonContiguousError;

#[derive(Error, Debug)]
pub(crate) enum RangeError {
    #[error("{range:?} is out of range for dimension {dimension}, of size {size}.")]
    OutOfRange {
        range: (usize, usize),
        dimension: usize,
        size: usize,
    },

    #[error("Range start index {0} is greater than range end index {1}.")]
    GreaterStartRange(usize, usize),

    #[error("Number of ranges ({num_ranges}) does not match the number of dimensions ({num_dimensions}).")]
    RangesLength {
        num_ranges: usize,
        num_dimensions: usize,
    },
}

#[derive(Error, Debug)]
pub(crate) enum IndexError {
    #[error("Index {index} is out of range for dimension {dimension}, of size {size}.")]
    OutOfRange {
        index: usize,
        dimension: usize,
        size: usize,
    },

    #[error("Number of indices ({num_indices}) does not match the number of dimensions ({num_dimensions}).")]
    IndicesLength {
        num_indices: usize,
        num_dimensions: usize,
    },
}

// --- Pool ---

/// Failures reported by the pooling kernel before any window is reduced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Invalid pooling configuration. {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("Unsupported pooling mode {0:?}. Expected \"max\" or \"avg\".")]
    UnsupportedMode(String),

    #[error("Expected a 4D tensor (batch, height, width, channels) with positive sizes, got {sizes:?}.")]
    ShapeMismatch { sizes: Vec<usize> },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Kernel size must be at least 1.")]
    ZeroKernelSize,

    #[error("Stride must be at least 1.")]
    ZeroStride,

    #[error("Padding is too large: the padded tensor size overflows `usize`.")]
    PaddingOverflow,

    #[error("Padded {axis} ({extent}) is smaller than the kernel size ({kernel_size}).")]
    WindowLargerThanInput {
        axis: &'static str,
        extent: usize,
        kernel_size: usize,
    },
}

// --- Misc ---

#[derive(Error, Debug)]
#[error("Cannot convert {value} from `usize` to type {dtype}.")]
pub(crate) struct UsizeCastError {
    pub value: usize,
    pub dtype: &'static str,
}

#[derive(Error, Debug)]
pub(crate) enum ArangeError {
    #[error("Step size cannot be zero.")]
    Zero,

    #[error("Step size is positive, but start > end.")]
    Positive,

    #[error("Step size is negative, but end > start.")]
    Negative,

    #[error("Step size cannot compared with zero.")]
    Comparison,
}
