//! 核心响应处理模块

use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// 资源路径前缀
pub const API_PREFIX: &str = "/api";

/// 根据对外地址生成资源的绝对链接
#[derive(Debug, Clone)]
pub struct Links {
    base: Arc<str>,
}

impl Links {
    pub fn new(public_url: &str) -> Self {
        Self {
            base: Arc::from(public_url.trim_end_matches('/')),
        }
    }

    /// 例如 `http://host/api/product/`
    pub fn collection(&self, resource: &str) -> String {
        format!("{}{}/{}/", self.base, API_PREFIX, resource)
    }

    /// 例如 `http://host/api/product/7/`
    pub fn detail(&self, resource: &str, id: i64) -> String {
        format!("{}{}/{}/{}/", self.base, API_PREFIX, resource, id)
    }
}

/// `/api/` 资源索引
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiIndex {
    pub customer: String,
    pub wishlist: String,
    pub product: String,
    pub user: String,
}

impl ApiIndex {
    pub fn new(links: &Links) -> Self {
        Self {
            customer: links.collection("customer"),
            wishlist: links.collection("wishlist"),
            product: links.collection("product"),
            user: links.collection("user"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_strip_trailing_slash() {
        let links = Links::new("http://example.com/");
        assert_eq!(links.collection("customer"), "http://example.com/api/customer/");
        assert_eq!(links.detail("product", 7), "http://example.com/api/product/7/");
    }

    #[test]
    fn test_index_lists_every_resource() {
        let index = ApiIndex::new(&Links::new("http://h"));
        assert_eq!(index.user, "http://h/api/user/");
        assert_eq!(index.wishlist, "http://h/api/wishlist/");
    }
}
