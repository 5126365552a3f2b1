mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::spawn_app;

#[tokio::test]
async fn test_product_round_trip() {
    let app = spawn_app().await;

    let response = app
        .post("/api/product/")
        .json(&json!({
            "title": "Cadeira Gamer",
            "brand": "Marca X",
            "price": 899.9,
            "image": "http://images.example.com/cadeira.png",
            "reviewScore": 4.7
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["reviewScore"], 4.7);
    assert_eq!(
        created["url"],
        format!("http://testserver/api/product/{id}/")
    );

    let response = app.get(&format!("/api/product/{id}/")).await;
    response.assert_status_ok();
    let fetched: Value = response.json();
    assert_eq!(fetched, created);
    assert_eq!(fetched["price"], 899.9);
}

#[tokio::test]
async fn test_review_score_is_optional_and_nullable() {
    let app = spawn_app().await;

    let response = app
        .post("/api/product/")
        .json(&json!({
            "title": "Sem nota",
            "brand": "Marca",
            "price": 0,
            "image": "http://images.example.com/x.png"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["reviewScore"], Value::Null);
    let path = format!("/api/product/{}/", created["id"]);

    let response = app.patch(&path).json(&json!({ "reviewScore": 3.5 })).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["reviewScore"], 3.5);

    // 缺省保持原值
    let response = app.patch(&path).json(&json!({ "price": 5 })).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["reviewScore"], 3.5);
    assert_eq!(body["price"], 5.0);

    let response = app.patch(&path).json(&json!({ "reviewScore": null })).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["reviewScore"], Value::Null);
}

#[tokio::test]
async fn test_product_validation() {
    let app = spawn_app().await;

    let response = app
        .post("/api/product/")
        .json(&json!({
            "title": "t".repeat(101),
            "brand": "Marca",
            "price": -1,
            "image": "not a url"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["fields"]["title"].is_array());
    assert!(body["fields"]["price"].is_array());
    assert_eq!(body["fields"]["image"][0], "Enter a valid URL.");

    let product = app.create_product(1).await;
    let response = app
        .put(&format!("/api/product/{}/", product["id"]))
        .json(&json!({ "title": "Apenas titulo" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["fields"]["brand"][0], "This field is required.");
}

#[tokio::test]
async fn test_product_listing_default_page() {
    let app = spawn_app().await;
    for n in 1..=12 {
        app.create_product(n).await;
    }

    let response = app.get("/api/product/").await;
    response.assert_status_ok();
    let body: Value = response.json();

    assert_eq!(body["count"], 12);
    assert_eq!(body["results"].as_array().unwrap().len(), 10);
    // 最新的在前
    assert_eq!(body["results"][0]["title"], "Produto 12");
    assert_eq!(
        body["next"],
        "http://testserver/api/product/?page=2&page_size=10"
    );
    assert_eq!(body["previous"], Value::Null);

    let response = app.get("/api/product/").add_query_param("page", "last").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(body["results"][1]["title"], "Produto 1");
    assert_eq!(body["next"], Value::Null);

    app.get("/api/product/")
        .add_query_param("page", "3")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_query_is_json_bad_request() {
    let app = spawn_app().await;

    for path in ["/api/product/?page=1&page=2", "/api/user/?page_size=1&page_size=2"] {
        let response = app.admin_get(path).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "BAD_REQUEST", "{path}");
        assert!(body["message"].as_str().unwrap().contains("duplicate field"));
    }
}

#[tokio::test]
async fn test_page_size_is_clamped() {
    let app = spawn_app().await;

    let mut tx = app.state.db.writer.begin().await.unwrap();
    for n in 0..1001 {
        sqlx::query("INSERT INTO products (title, brand, price, image) VALUES (?, ?, ?, ?)")
            .bind(format!("Produto {n}"))
            .bind("Marca")
            .bind(1.0)
            .bind("http://images.example.com/p.png")
            .execute(&mut *tx)
            .await
            .unwrap();
    }
    tx.commit().await.unwrap();

    let response = app
        .get("/api/product/")
        .add_query_param("page_size", "5000")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();

    assert_eq!(body["count"], 1001);
    assert_eq!(body["results"].as_array().unwrap().len(), 1000);
    assert_eq!(
        body["next"],
        "http://testserver/api/product/?page=2&page_size=1000"
    );
}

#[tokio::test]
async fn test_delete_product_in_wishlist_is_restricted() {
    let app = spawn_app().await;
    let customer = app.create_customer(1).await;
    let product = app.create_product(1).await;
    let other = app.create_product(2).await;
    app.add_to_wishlist(
        customer["id"].as_i64().unwrap(),
        product["id"].as_i64().unwrap(),
    )
    .await;

    let response = app.delete(&format!("/api/product/{}/", product["id"])).await;
    response.assert_status(StatusCode::CONFLICT);

    app.delete(&format!("/api/product/{}/", other["id"]))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.get(&format!("/api/product/{}/", other["id"]))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.get(&format!("/api/product/{}/", product["id"]))
        .await
        .assert_status_ok();
}
