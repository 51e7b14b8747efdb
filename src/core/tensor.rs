use anyhow::Result;
use num_traits::Zero;
use std::{borrow::Cow, cmp::Ordering, iter::successors, ops::Add, sync::Arc};
use tracing::trace;

use crate::core::{
    errors::*,
    iters::Indexer,
    shape::Shape,
    view::WindowView,
};

/// N-dimensional array over a shared buffer. Views share `data` and differ
/// only in `shape`.
pub struct Tensor<T> {
    pub(crate) data: Arc<Vec<T>>,
    pub(crate) shape: Shape,
}

impl<T: Copy> Tensor<T> {
    pub(crate) fn init(data: Vec<T>, sizes: &[usize]) -> Tensor<T> {
        Tensor {
            data: Arc::new(data),
            shape: Shape::new(sizes),
        }
    }

    pub fn new(data: &[T], sizes: &[usize]) -> Result<Tensor<T>> {
        let shape = Shape::new(sizes);
        shape.valid_data_length(data.len())?;

        Ok(Tensor {
            data: Arc::new(data.to_vec()),
            shape,
        })
    }

    pub fn from_vec(data: Vec<T>, sizes: &[usize]) -> Result<Tensor<T>> {
        Shape::new(sizes).valid_data_length(data.len())?;

        Ok(Tensor::init(data, sizes))
    }

    pub fn same(element: T, sizes: &[usize]) -> Tensor<T> {
        Tensor::init(vec![element; sizes.iter().product()], sizes)
    }

    pub fn arange(start: T, end: T, step: T) -> Result<Tensor<T>>
    where
        T: Add<Output = T> + PartialOrd + Zero,
    {
        let ascending = match step
            .partial_cmp(&T::zero())
            .ok_or(ArangeError::Comparison)?
        {
            Ordering::Greater if end > start => Ok(true),
            Ordering::Less if start > end => Ok(false),
            Ordering::Greater => Err(ArangeError::Positive),
            Ordering::Less => Err(ArangeError::Negative),
            Ordering::Equal => Err(ArangeError::Zero),
        }?;

        let data: Vec<T> = successors(Some(start), |&prev| {
            let curr = prev + step;
            let cond = end > curr;
            (ascending == cond).then_some(curr)
        })
        .collect();

        let sizes = [data.len()];
        Ok(Tensor::init(data, &sizes))
    }

    // --- Data ---

    pub fn to_contiguous(&self) -> Tensor<T> {
        Tensor::init(self.data_non_contiguous(), &self.shape.sizes)
    }

    pub fn data(&self) -> Cow<'_, [T]> {
        if self.is_contiguous() {
            let start = self.offset();
            Cow::Borrowed(&self.data[start..start + self.numel()])
        } else {
            Cow::Owned(self.data_non_contiguous())
        }
    }

    fn data_non_contiguous(&self) -> Vec<T> {
        Indexer::new(&self.shape.sizes)
            .map(|index| self.idx(&index))
            .collect()
    }

    pub(crate) fn idx(&self, indices: &[usize]) -> T {
        self.data[self.shape.idx(indices)]
    }

    pub fn index(&self, indices: &[usize]) -> Result<T> {
        Ok(self.data[self.shape.index(indices)?])
    }

    // --- New Data, New Shape ---

    /// Fills a new contiguous buffer with `constant` and copies `self` into it,
    /// offset by the leading pad of each dimension. Missing dimensions are not padded.
    pub fn pad(&self, constant: T, padding: &[(usize, usize)]) -> Result<Tensor<T>> {
        let shape = self.shape.pad(padding)?;
        trace!(from = ?self.sizes(), to = ?shape.sizes, "padding tensor");

        let ranges = shape
            .sizes
            .iter()
            .zip(padding.iter().chain(std::iter::repeat(&(0, 0))))
            .map(|(&size, &(start, end))| (start, size - end))
            .collect::<Vec<(usize, usize)>>();
        let inner = shape.slice(&ranges)?;

        let mut data = vec![constant; shape.numel()];
        for (index, value) in Indexer::new(&inner.sizes).zip(self.data().iter()) {
            data[inner.idx(&index)] = *value;
        }

        Ok(Tensor {
            data: Arc::new(data),
            shape,
        })
    }

    pub fn unary_map<R>(&self, f: impl Fn(T) -> R) -> Tensor<R> {
        let data = self.data().iter().map(|&elem| f(elem)).collect();

        Tensor {
            data: Arc::new(data),
            shape: Shape::new(self.sizes()),
        }
    }
}

impl<T> Tensor<T> {
    // --- Same Data, Different Shape ---

    pub(crate) fn with_shape(&self, shape: Shape) -> Tensor<T> {
        Tensor {
            data: Arc::clone(&self.data),
            shape,
        }
    }

    pub fn view(&self, sizes: &[usize]) -> Result<Tensor<T>> {
        Ok(self.with_shape(self.shape.view(sizes)?))
    }

    pub fn slice(&self, ranges: &[(usize, usize)]) -> Result<Tensor<T>> {
        Ok(self.with_shape(self.shape.slice(ranges)?))
    }

    /// Borrowed `(D, outH, outW, C, k, k)` view of every pooling window.
    /// Nothing is copied; the view aliases this tensor's buffer.
    pub fn windows(&self, kernel_size: usize, stride: usize) -> Result<WindowView<'_, T>>
    where
        T: Copy,
    {
        let shape = self.shape.window(kernel_size, stride)?;
        Ok(WindowView::new(self.data.as_slice(), shape))
    }

    // --- Shape Attributes ---

    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    pub fn rank(&self) -> usize {
        self.shape.rank()
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

    pub fn is_contiguous(&self) -> bool {
        self.shape.is_contiguous()
    }
}

impl<T> Clone for Tensor<T> {
    fn clone(&self) -> Self {
        self.with_shape(self.shape.clone())
    }
}

impl<T: Copy + PartialEq> PartialEq for Tensor<T> {
    fn eq(&self, rhs: &Tensor<T>) -> bool {
        self.sizes() == rhs.sizes() && self.data() == rhs.data()
    }
}
