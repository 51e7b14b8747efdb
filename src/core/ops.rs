pub(crate) mod pool;
mod reduce_ops;
