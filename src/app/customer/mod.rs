//! 客户

pub mod handler;
pub mod model;
pub mod service;

pub use model::{Customer, CustomerPayload, CustomerResource, CustomerView};
pub use service::CustomerService;
