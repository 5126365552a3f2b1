mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::spawn_app;

#[tokio::test]
async fn test_duplicate_pair_is_rejected() {
    let app = spawn_app().await;
    let customer = app.create_customer(1).await;
    let product = app.create_product(1).await;

    let created = app
        .add_to_wishlist(
            customer["id"].as_i64().unwrap(),
            product["id"].as_i64().unwrap(),
        )
        .await;
    assert_eq!(
        created,
        json!({ "id": created["id"], "customer": customer["id"], "product": product["id"] })
    );

    let response = app
        .post("/api/wishlist/")
        .json(&json!({ "customer": customer["id"], "product": product["id"] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["fields"]["non_field_errors"][0],
        "The customer already has this product in their wishlist."
    );

    let response = app.get("/api/wishlist/").await;
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_reads_are_expanded() {
    let app = spawn_app().await;
    let customer = app.create_customer(1).await;
    let product = app.create_product(1).await;
    let link = app
        .add_to_wishlist(
            customer["id"].as_i64().unwrap(),
            product["id"].as_i64().unwrap(),
        )
        .await;

    let response = app.get(&format!("/api/wishlist/{}/", link["id"])).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], link["id"]);
    assert_eq!(body["customer"], customer);
    assert_eq!(body["product"], product);

    let response = app.get("/api/wishlist/").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body[0]["customer"]["email"], "cliente1@example.com");
    assert_eq!(body[0]["product"]["title"], "Produto 1");
}

#[tokio::test]
async fn test_unknown_references() {
    let app = spawn_app().await;
    let customer = app.create_customer(1).await;

    let response = app
        .post("/api/wishlist/")
        .json(&json!({ "customer": customer["id"], "product": 404 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["fields"]["product"][0],
        "Invalid pk \"404\" - object does not exist."
    );
    assert!(body["fields"].get("customer").is_none());

    let response = app.post("/api/wishlist/").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["fields"]["customer"][0], "This field is required.");
    assert_eq!(body["fields"]["product"][0], "This field is required.");
}

#[tokio::test]
async fn test_update_revalidates_pair() {
    let app = spawn_app().await;
    let customer = app.create_customer(1).await;
    let p1 = app.create_product(1).await;
    let p2 = app.create_product(2).await;
    let customer_id = customer["id"].as_i64().unwrap();

    let first = app.add_to_wishlist(customer_id, p1["id"].as_i64().unwrap()).await;
    let second = app.add_to_wishlist(customer_id, p2["id"].as_i64().unwrap()).await;

    // 改成已存在的组合
    let response = app
        .patch(&format!("/api/wishlist/{}/", second["id"]))
        .json(&json!({ "product": p1["id"] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // 保持自身组合不算重复
    let response = app
        .put(&format!("/api/wishlist/{}/", first["id"]))
        .json(&json!({ "customer": customer_id, "product": p1["id"] }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), first);

    let p3 = app.create_product(3).await;
    let response = app
        .patch(&format!("/api/wishlist/{}/", second["id"]))
        .json(&json!({ "product": p3["id"] }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["customer"], customer_id);
    assert_eq!(body["product"], p3["id"]);
}

#[tokio::test]
async fn test_delete_wishlist_entry() {
    let app = spawn_app().await;
    let customer = app.create_customer(1).await;
    let product = app.create_product(1).await;
    let link = app
        .add_to_wishlist(
            customer["id"].as_i64().unwrap(),
            product["id"].as_i64().unwrap(),
        )
        .await;
    let path = format!("/api/wishlist/{}/", link["id"]);

    app.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    app.get(&path).await.assert_status(StatusCode::NOT_FOUND);
    app.delete(&path).await.assert_status(StatusCode::NOT_FOUND);

    let response = app.get(&format!("/api/customer/{}/", customer["id"])).await;
    assert_eq!(response.json::<Value>()["wishList"], json!([]));
}
