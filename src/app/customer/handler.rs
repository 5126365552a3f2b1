//! 客户处理器

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};

use super::model::{CustomerPayload, CustomerResource, CustomerView};
use crate::app::AppState;
use crate::core::{
    action::Action,
    error::{CoreError, ErrorResponse},
    extract::{ApiJson, ResourceId},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/customer/", get(list_customers).post(create_customer))
        .route(
            "/api/customer/:id/",
            get(get_customer)
                .put(update_customer)
                .patch(partial_update_customer)
                .delete(delete_customer),
        )
}

/// 列出全部客户及其收藏夹（不分页）
#[utoipa::path(
    get,
    path = "/api/customer/",
    tag = "Customer",
    responses(
        (status = 200, description = "Every customer with their wish list", body = Vec<CustomerView>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerView>>, CoreError> {
    let customers = state.customer_service.list_customers().await?;
    let views = state
        .customer_service
        .render_all(customers, Action::List, &state.links)
        .await?;
    Ok(Json(views))
}

#[utoipa::path(
    post,
    path = "/api/customer/",
    tag = "Customer",
    request_body = CustomerPayload,
    responses(
        (status = 201, description = "Customer created", body = CustomerResource),
        (status = 400, description = "Invalid data or duplicate email", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn create_customer(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CustomerPayload>,
) -> Result<(StatusCode, Json<CustomerView>), CoreError> {
    let customer = state.customer_service.create_customer(payload).await?;
    let view = state
        .customer_service
        .render(customer, Action::Create, &state.links)
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    get,
    path = "/api/customer/{id}/",
    tag = "Customer",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "The customer with their wish list", body = CustomerView),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Unknown customer", body = ErrorResponse)
    )
)]
pub async fn get_customer(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<CustomerView>, CoreError> {
    let customer = state.customer_service.get_customer(id).await?;
    let view = state
        .customer_service
        .render(customer, Action::Retrieve, &state.links)
        .await?;
    Ok(Json(view))
}

#[utoipa::path(
    put,
    path = "/api/customer/{id}/",
    tag = "Customer",
    params(("id" = i64, Path, description = "Customer id")),
    request_body = CustomerPayload,
    responses(
        (status = 200, description = "Customer replaced", body = CustomerResource),
        (status = 400, description = "Invalid data or duplicate email", body = ErrorResponse),
        (status = 404, description = "Unknown customer", body = ErrorResponse)
    )
)]
pub async fn update_customer(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ApiJson(payload): ApiJson<CustomerPayload>,
) -> Result<Json<CustomerView>, CoreError> {
    save(state, id, payload, Action::Update).await
}

#[utoipa::path(
    patch,
    path = "/api/customer/{id}/",
    tag = "Customer",
    params(("id" = i64, Path, description = "Customer id")),
    request_body = CustomerPayload,
    responses(
        (status = 200, description = "Customer updated", body = CustomerResource),
        (status = 400, description = "Invalid data or duplicate email", body = ErrorResponse),
        (status = 404, description = "Unknown customer", body = ErrorResponse)
    )
)]
pub async fn partial_update_customer(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ApiJson(payload): ApiJson<CustomerPayload>,
) -> Result<Json<CustomerView>, CoreError> {
    save(state, id, payload, Action::PartialUpdate).await
}

#[utoipa::path(
    delete,
    path = "/api/customer/{id}/",
    tag = "Customer",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 404, description = "Unknown customer", body = ErrorResponse),
        (status = 409, description = "Customer still has a wish list", body = ErrorResponse)
    )
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, CoreError> {
    state.customer_service.delete_customer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn save(
    state: AppState,
    id: i64,
    payload: CustomerPayload,
    action: Action,
) -> Result<Json<CustomerView>, CoreError> {
    let customer = state
        .customer_service
        .update_customer(id, payload, action)
        .await?;
    let view = state
        .customer_service
        .render(customer, action, &state.links)
        .await?;
    Ok(Json(view))
}
