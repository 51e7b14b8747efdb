pub(crate) mod config;
mod display;
pub(crate) mod errors;
mod iters;
pub(crate) mod ops;
mod shape;
mod tensor;
mod utils;
pub(crate) mod view;

pub use tensor::Tensor;
