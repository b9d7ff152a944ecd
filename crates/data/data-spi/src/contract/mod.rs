//! Contracts implemented by data-core.

mod dataset_loader;

pub use dataset_loader::DatasetLoader;
