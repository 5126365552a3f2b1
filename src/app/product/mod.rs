//! 产品

pub mod handler;
pub mod model;
pub mod service;

pub use model::{Product, ProductPayload, ProductResource};
pub use service::ProductService;
