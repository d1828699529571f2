use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::order_workflow::{OrderBoard, StatusChange};
use crate::domain::order::{Order, OrderFilter, OrderStats, OrderStatus};
use crate::errors::AppError;

use super::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Matches order number, customer name (case-insensitive) or phone.
    pub search: Option<String>,
    /// Exact status, e.g. "PENDING".
    pub status: Option<String>,
}

/// The status the operator saw when choosing the action.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusActionRequest {
    pub current_status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderSummaryResponse {
    pub id: String,
    pub order_number: i64,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    /// Decimal as a string, e.g. "3750.50"
    pub total: String,
    pub status: String,
    pub status_label: String,
    /// Target of the "advance" action; absent for terminal orders.
    pub next_status: Option<String>,
    pub cancellable: bool,
    pub created_at: String,
}

impl From<&Order> for OrderSummaryResponse {
    fn from(o: &Order) -> Self {
        OrderSummaryResponse {
            id: o.id.clone(),
            order_number: o.order_number,
            customer_name: o.customer_name.clone(),
            customer_phone: o.customer_phone.clone(),
            total: o.total.to_string(),
            status: o.status.to_string(),
            status_label: o.status.label().to_string(),
            next_status: o.status.next_status().map(|s| s.to_string()),
            cancellable: o.status.can_cancel(),
            created_at: o.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderStatsResponse {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl From<OrderStats> for OrderStatsResponse {
    fn from(s: OrderStats) -> Self {
        OrderStatsResponse {
            total: s.total,
            pending: s.pending,
            in_progress: s.in_progress,
            completed: s.completed,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderSummaryResponse>,
    pub stats: OrderStatsResponse,
}

impl From<OrderBoard> for ListOrdersResponse {
    fn from(board: OrderBoard) -> Self {
        ListOrdersResponse {
            items: board.orders.iter().map(Into::into).collect(),
            stats: board.stats.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub product_id: Option<String>,
    pub name: String,
    pub variant: Option<String>,
    pub quantity: i32,
    pub unit_price: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetailResponse {
    pub order: OrderSummaryResponse,
    pub payment_status: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_type: Option<String>,
    pub items: Vec<OrderItemResponse>,
    pub subtotal: String,
    pub discount: String,
    pub delivery_fee: String,
    pub promo_code: Option<String>,
}

impl From<Order> for OrderDetailResponse {
    fn from(o: Order) -> Self {
        OrderDetailResponse {
            order: OrderSummaryResponse::from(&o),
            payment_status: o.payment_status.map(|p| p.as_str().to_string()),
            delivery_address: o.delivery_address,
            delivery_type: o.delivery_type,
            items: o
                .items
                .into_iter()
                .map(|i| OrderItemResponse {
                    product_id: i.product_id,
                    name: i.name,
                    variant: i.variant,
                    quantity: i.quantity,
                    unit_price: i.unit_price.to_string(),
                })
                .collect(),
            subtotal: o.subtotal.to_string(),
            discount: o.discount.to_string(),
            delivery_fee: o.delivery_fee.to_string(),
            promo_code: o.promo_code.map(|p| p.code),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusActionResponse {
    pub message: String,
    pub status: String,
    pub items: Vec<OrderSummaryResponse>,
    pub stats: OrderStatsResponse,
}

impl From<StatusChange> for StatusActionResponse {
    fn from(change: StatusChange) -> Self {
        let board = ListOrdersResponse::from(change.board);
        StatusActionResponse {
            message: change.message,
            status: change.status.to_string(),
            items: board.items,
            stats: board.stats,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /orders
///
/// All orders newest first, narrowed by the optional search term and status.
/// Stats always cover the unfiltered list.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("search" = Option<String>, Query, description = "Order number, customer name or phone"),
        ("status" = Option<String>, Query, description = "Exact order status"),
    ),
    responses(
        (status = 200, description = "Orders with stats", body = ListOrdersResponse),
        (status = 400, description = "Unknown status filter"),
        (status = 502, description = "Backend request failed"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    state: web::Data<AppState>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let status = params
        .status
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<OrderStatus>())
        .transpose()?;
    let filter = OrderFilter {
        search: params.search,
        status,
    };

    let board = state.orders.load(&filter).await?;
    Ok(HttpResponse::Ok().json(ListOrdersResponse::from(board)))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderDetailResponse),
        (status = 404, description = "Order not found"),
        (status = 502, description = "Backend request failed"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order = state.orders.details(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(OrderDetailResponse::from(order)))
}

/// POST /orders/{id}/advance
///
/// Moves the order to the next status of the fulfilment chain and returns
/// the reloaded order list.
#[utoipa::path(
    post,
    path = "/orders/{id}/advance",
    params(
        ("id" = String, Path, description = "Order id"),
    ),
    request_body = StatusActionRequest,
    responses(
        (status = 200, description = "Status advanced", body = StatusActionResponse),
        (status = 409, description = "Order is in a terminal status"),
        (status = 502, description = "Backend request failed"),
    ),
    tag = "orders"
)]
pub async fn advance_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<StatusActionRequest>,
) -> Result<HttpResponse, AppError> {
    let current: OrderStatus = body.current_status.parse()?;
    let change = state.orders.advance(&path.into_inner(), current).await?;
    Ok(HttpResponse::Ok().json(StatusActionResponse::from(change)))
}

/// POST /orders/{id}/cancel
#[utoipa::path(
    post,
    path = "/orders/{id}/cancel",
    params(
        ("id" = String, Path, description = "Order id"),
    ),
    request_body = StatusActionRequest,
    responses(
        (status = 200, description = "Order cancelled", body = StatusActionResponse),
        (status = 409, description = "Order is already completed or cancelled"),
        (status = 502, description = "Backend request failed"),
    ),
    tag = "orders"
)]
pub async fn cancel_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<StatusActionRequest>,
) -> Result<HttpResponse, AppError> {
    let current: OrderStatus = body.current_status.parse()?;
    let change = state.orders.cancel(&path.into_inner(), current).await?;
    Ok(HttpResponse::Ok().json(StatusActionResponse::from(change)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test, App};
    use serde_json::{json, Value};

    use super::*;
    use crate::application::fake_api::{Call, FakeApi};
    use crate::domain::order::tests::order;
    use crate::session::Session;

    fn state(api: &Arc<FakeApi>) -> web::Data<AppState> {
        web::Data::new(AppState::new(api.clone(), Session::new()))
    }

    #[actix_web::test]
    async fn list_exposes_allowed_actions() {
        let api = Arc::new(FakeApi::with_orders(vec![
            order("1", 1, OrderStatus::Pending),
            order("2", 2, OrderStatus::Completed),
        ]));
        let app = test::init_service(
            App::new()
                .app_data(state(&api))
                .configure(crate::handlers::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/orders").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["stats"]["total"], 2);
        let completed = &body["items"][0];
        assert_eq!(completed["id"], "2");
        assert_eq!(completed["next_status"], Value::Null);
        assert_eq!(completed["cancellable"], false);
        let pending = &body["items"][1];
        assert_eq!(pending["next_status"], "CONFIRMED");
        assert_eq!(pending["cancellable"], true);
    }

    #[actix_web::test]
    async fn advance_returns_reloaded_list() {
        let api = Arc::new(FakeApi::with_orders(vec![order("1", 1, OrderStatus::Pending)]));
        let app = test::init_service(
            App::new()
                .app_data(state(&api))
                .configure(crate::handlers::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/orders/1/advance")
            .set_json(json!({ "current_status": "PENDING" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "CONFIRMED");
        assert_eq!(body["message"], "Status changed to \"Confirmed\"");
        assert_eq!(body["items"][0]["status"], "CONFIRMED");
        assert_eq!(
            api.writes(),
            vec![Call::SetOrderStatus("1".to_string(), OrderStatus::Confirmed)]
        );
    }

    #[actix_web::test]
    async fn cancel_completed_is_conflict_without_backend_call() {
        let api = Arc::new(FakeApi::with_orders(vec![order("1", 1, OrderStatus::Completed)]));
        let app = test::init_service(
            App::new()
                .app_data(state(&api))
                .configure(crate::handlers::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/orders/1/cancel")
            .set_json(json!({ "current_status": "COMPLETED" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Cannot cancel an order that is Completed");
        assert!(api.calls().is_empty());
    }

    #[actix_web::test]
    async fn unknown_status_is_bad_request() {
        let api = Arc::new(FakeApi::default());
        let app = test::init_service(
            App::new()
                .app_data(state(&api))
                .configure(crate::handlers::configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/orders?status=SHIPPED")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        assert!(api.calls().is_empty());
    }

    #[actix_web::test]
    async fn missing_order_is_404() {
        let api = Arc::new(FakeApi::default());
        let app = test::init_service(
            App::new()
                .app_data(state(&api))
                .configure(crate::handlers::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/orders/42").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
