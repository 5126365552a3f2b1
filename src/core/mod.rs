//! 核心层：错误、分页、响应、提取器与中间件

pub mod action;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod pagination;
pub mod response;
