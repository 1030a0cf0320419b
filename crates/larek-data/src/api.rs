//! Shop API endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use larek_commerce::catalog::Product;
use larek_commerce::checkout::{Order, PaymentMethod};
use larek_commerce::ids::{OrderId, ProductId};

use crate::{FetchClient, FetchError, Response};

/// Catalog endpoint.
pub const PRODUCTS_PATH: &str = "/product";
/// Order submission endpoint.
pub const ORDER_PATH: &str = "/order";

/// `GET /product` response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductList {
    pub total: u64,
    pub items: Vec<Product>,
}

/// `POST /order` request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub payment: PaymentMethod,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub total: u64,
    pub items_ids_list: Vec<ProductId>,
}

impl From<&Order> for OrderRequest {
    fn from(order: &Order) -> Self {
        Self {
            payment: order.payment(),
            email: order.email().to_string(),
            phone: order.phone().to_string(),
            address: order.address().to_string(),
            total: order.total(),
            items_ids_list: order.item_ids(),
        }
    }
}

/// `POST /order` success body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: OrderId,
    pub total: u64,
}

/// Error body returned by any endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// An accepted order as acknowledged by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderReceipt {
    pub order_id: OrderId,
    /// Amount the server charged.
    pub total: u64,
    pub received_at: DateTime<Utc>,
}

/// Typed access to the shop endpoints.
#[derive(Clone)]
pub struct LarekApi {
    client: FetchClient,
}

impl LarekApi {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    /// Fetch the full product catalog.
    pub async fn fetch_products(&self) -> Result<ProductList, FetchError> {
        let response = self
            .client
            .get(PRODUCTS_PATH)
            .header("Accept", "application/json")
            .send()
            .await?;
        let list: ProductList = parse_reply(response)?;
        info!(total = list.total, items = list.items.len(), "catalog fetched");
        Ok(list)
    }

    /// Submit a finished order.
    pub async fn submit_order(&self, order: &Order) -> Result<OrderReceipt, FetchError> {
        let request = OrderRequest::from(order);
        let response = self.client.post(ORDER_PATH).json(&request)?.send().await?;
        let reply: OrderResponse = parse_reply(response)?;

        if reply.total != order.total() {
            warn!(
                order_id = %reply.order_id,
                expected = order.total(),
                charged = reply.total,
                "server total differs from cart total"
            );
        }
        info!(order_id = %reply.order_id, total = reply.total, "order accepted");

        Ok(OrderReceipt {
            order_id: reply.order_id,
            total: reply.total,
            received_at: Utc::now(),
        })
    }
}

/// Decode a success body, or turn an `{"error": ...}` body into `Rejected`.
fn parse_reply<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    if let Ok(ErrorResponse { error }) = response.json::<ErrorResponse>() {
        return Err(FetchError::Rejected(error));
    }
    response.error_for_status()?.json()
}
