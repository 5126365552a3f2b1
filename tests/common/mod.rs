//! 集成测试公共设施：内存数据库 + 已登录的普通用户与管理员

#![allow(dead_code)]

use axum::http::{header, HeaderValue};
use axum_test::{TestRequest, TestServer};
use serde_json::{json, Value};

use wishlist_api::app::user::UserPayload;
use wishlist_api::app::{router, AppState};
use wishlist_api::config::{AdminConfig, Config};

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "admin-pass";
pub const API_USER: &str = "api_user";
pub const API_PASS: &str = "api-user-pass";

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub user_token: String,
    pub admin_token: String,
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();
    config.server.public_url = "http://testserver".to_string();
    config.admin = Some(AdminConfig {
        username: ADMIN_USER.to_string(),
        email: "admin@example.com".to_string(),
        password: ADMIN_PASS.to_string(),
    });
    config
}

pub async fn spawn_app() -> TestApp {
    let state = AppState::build(&test_config()).await.unwrap();

    state
        .user_service
        .create_user(UserPayload {
            username: Some(API_USER.to_string()),
            email: Some("api.user@example.com".to_string()),
            password: Some(API_PASS.to_string()),
        })
        .await
        .unwrap();

    let user_token = state.auth_service.login(API_USER, API_PASS).await.unwrap().token;
    let admin_token = state
        .auth_service
        .login(ADMIN_USER, ADMIN_PASS)
        .await
        .unwrap()
        .token;

    let server = TestServer::new(router(state.clone())).unwrap();

    TestApp {
        server,
        state,
        user_token,
        admin_token,
    }
}

pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

impl TestApp {
    pub fn get(&self, path: &str) -> TestRequest {
        self.server
            .get(path)
            .add_header(header::AUTHORIZATION, bearer(&self.user_token))
    }

    pub fn post(&self, path: &str) -> TestRequest {
        self.server
            .post(path)
            .add_header(header::AUTHORIZATION, bearer(&self.user_token))
    }

    pub fn put(&self, path: &str) -> TestRequest {
        self.server
            .put(path)
            .add_header(header::AUTHORIZATION, bearer(&self.user_token))
    }

    pub fn patch(&self, path: &str) -> TestRequest {
        self.server
            .patch(path)
            .add_header(header::AUTHORIZATION, bearer(&self.user_token))
    }

    pub fn delete(&self, path: &str) -> TestRequest {
        self.server
            .delete(path)
            .add_header(header::AUTHORIZATION, bearer(&self.user_token))
    }

    pub fn admin_get(&self, path: &str) -> TestRequest {
        self.server
            .get(path)
            .add_header(header::AUTHORIZATION, bearer(&self.admin_token))
    }

    pub fn admin_post(&self, path: &str) -> TestRequest {
        self.server
            .post(path)
            .add_header(header::AUTHORIZATION, bearer(&self.admin_token))
    }

    pub fn admin_put(&self, path: &str) -> TestRequest {
        self.server
            .put(path)
            .add_header(header::AUTHORIZATION, bearer(&self.admin_token))
    }

    pub fn admin_delete(&self, path: &str) -> TestRequest {
        self.server
            .delete(path)
            .add_header(header::AUTHORIZATION, bearer(&self.admin_token))
    }

    pub async fn create_product(&self, n: usize) -> Value {
        let response = self
            .post("/api/product/")
            .json(&json!({
                "title": format!("Produto {n}"),
                "brand": format!("Marca {n}"),
                "price": 10.0 + n as f64,
                "image": format!("http://images.example.com/produto_{n}.png"),
                "reviewScore": 4.0
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json()
    }

    pub async fn create_customer(&self, n: usize) -> Value {
        let response = self
            .post("/api/customer/")
            .json(&json!({
                "name": format!("Cliente {n}"),
                "email": format!("cliente{n}@example.com")
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json()
    }

    pub async fn add_to_wishlist(&self, customer: i64, product: i64) -> Value {
        let response = self
            .post("/api/wishlist/")
            .json(&json!({ "customer": customer, "product": product }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json()
    }
}
