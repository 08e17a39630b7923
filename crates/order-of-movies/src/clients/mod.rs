pub mod dataset;

pub use dataset::{DatasetClient, DatasetSource};
