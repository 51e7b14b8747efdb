mod indexer;

pub(crate) use indexer::Indexer;
