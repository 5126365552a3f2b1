//! 页码分页
//!
//! 默认每页 10 条，`page_size` 参数可覆盖，超过 1000 时截断为 1000。

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::error::CoreError;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 1000;

/// 列表查询参数
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 页码（从 1 开始）或 `last`
    pub page: Option<String>,
    /// 每页条数，最大 1000
    pub page_size: Option<String>,
}

/// 解析后的分页请求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
    pub num_pages: u32,
}

impl PageQuery {
    /// 非法或非正数的 page_size 回退到默认值
    pub fn page_size(&self) -> u32 {
        self.page_size
            .as_deref()
            .and_then(|size| size.trim().parse::<u32>().ok())
            .filter(|size| *size > 0)
            .map(|size| size.min(MAX_PAGE_SIZE))
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// 结合总数确定页码，越界返回 404
    pub fn resolve(&self, total: i64) -> Result<PageRequest, CoreError> {
        let page_size = self.page_size();
        let total = total.max(0) as u64;
        let num_pages = total.div_ceil(page_size as u64).max(1) as u32;

        let page = match self.page.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some("last") => num_pages,
            Some(raw) => raw.parse::<u32>().map_err(|_| invalid_page())?,
        };

        if page == 0 || page > num_pages {
            return Err(invalid_page());
        }

        Ok(PageRequest {
            page,
            page_size,
            num_pages,
        })
    }
}

impl PageRequest {
    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }

    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.page_size as i64
    }
}

fn invalid_page() -> CoreError {
    CoreError::NotFound("Invalid page.".to_string())
}

/// 分页响应
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// `collection_url` 是列表的绝对地址，不含查询参数
    pub fn new(results: Vec<T>, count: i64, request: PageRequest, collection_url: &str) -> Self {
        let link = |page: u32| {
            format!(
                "{}?page={}&page_size={}",
                collection_url, page, request.page_size
            )
        };

        Self {
            count,
            next: (request.page < request.num_pages).then(|| link(request.page + 1)),
            previous: (request.page > 1).then(|| link(request.page - 1)),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, page_size: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(str::to_string),
            page_size: page_size.map(str::to_string),
        }
    }

    #[test]
    fn test_page_size_defaults_and_clamps() {
        assert_eq!(query(None, None).page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(query(None, Some("25")).page_size(), 25);
        assert_eq!(query(None, Some("1000")).page_size(), 1000);
        assert_eq!(query(None, Some("5000")).page_size(), MAX_PAGE_SIZE);
        assert_eq!(query(None, Some("0")).page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(query(None, Some("-3")).page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(query(None, Some("abc")).page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_resolve_pages() {
        let request = query(None, None).resolve(25).unwrap();
        assert_eq!(request.page, 1);
        assert_eq!(request.num_pages, 3);
        assert_eq!(request.offset(), 0);
        assert_eq!(request.limit(), 10);

        let request = query(Some("last"), None).resolve(25).unwrap();
        assert_eq!(request.page, 3);
        assert_eq!(request.offset(), 20);

        // 空集合仍然有第 1 页
        let request = query(None, None).resolve(0).unwrap();
        assert_eq!(request.page, 1);
        assert_eq!(request.num_pages, 1);
    }

    #[test]
    fn test_invalid_pages() {
        assert!(matches!(
            query(Some("4"), None).resolve(25),
            Err(CoreError::NotFound(_))
        ));
        assert!(query(Some("0"), None).resolve(25).is_err());
        assert!(query(Some("first"), None).resolve(25).is_err());
        assert!(query(Some("2"), None).resolve(0).is_err());
    }

    #[test]
    fn test_page_links() {
        let url = "http://localhost/api/product/";
        let request = query(Some("2"), Some("10")).resolve(25).unwrap();
        let page = Page::new(vec![1, 2, 3], 25, request, url);

        assert_eq!(page.count, 25);
        assert_eq!(
            page.next.as_deref(),
            Some("http://localhost/api/product/?page=3&page_size=10")
        );
        assert_eq!(
            page.previous.as_deref(),
            Some("http://localhost/api/product/?page=1&page_size=10")
        );

        let request = query(None, None).resolve(3).unwrap();
        let page = Page::new(vec![1, 2, 3], 3, request, url);
        assert!(page.next.is_none());
        assert!(page.previous.is_none());
    }
}
