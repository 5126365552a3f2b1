//! 收藏夹（客户与产品的关联）

pub mod handler;
pub mod model;
pub mod service;

pub use model::{Wishlist, WishlistPayload, WishlistResource, WishlistView};
pub use service::WishlistService;
