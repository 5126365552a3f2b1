//! 用户

pub mod handler;
pub mod model;
pub mod service;

pub use model::{User, UserPayload, UserResource};
pub use service::UserService;
