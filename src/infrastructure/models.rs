//! Wire format of the backend API and its mapping onto domain types.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::catalog::{Banner, Category, EntityPatch};
use crate::domain::dashboard::DashboardStats;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderItem, OrderStatus, PaymentStatus, PromoCode};

/// Every response body is wrapped as `{"data": ...}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Ids arrive either as strings or as integers depending on the table.
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(RawId::deserialize(deserializer)?.into())
}

fn opt_id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?.map(Into::into))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(id: RawId) -> Self {
        match id {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Money arrives as a decimal string or a JSON number. Numbers are read
/// from their shortest decimal text so `99.99` stays `99.99`.
fn decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigDecimal, D::Error> {
    let text = match RawDecimal::deserialize(deserializer)? {
        RawDecimal::Text(s) => s,
        RawDecimal::Number(n) => n.to_string(),
    };
    BigDecimal::from_str(text.trim()).map_err(D::Error::custom)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Text(String),
    Number(serde_json::Number),
}

fn default_true() -> bool {
    true
}

fn invalid(what: &str, e: DomainError) -> DomainError {
    DomainError::Remote(format!("malformed {}: {}", what, e))
}

// ── Auth / dashboard ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LoginBody<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginRow {
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardRow {
    pub total_orders: u64,
    #[serde(deserialize_with = "decimal")]
    pub revenue: BigDecimal,
    pub products: u64,
    pub users: u64,
}

impl From<DashboardRow> for DashboardStats {
    fn from(row: DashboardRow) -> Self {
        DashboardStats {
            total_orders: row.total_orders,
            revenue: row.revenue,
            products: row.products,
            users: row.users,
        }
    }
}

// ── Orders ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProductRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRow {
    #[serde(default, deserialize_with = "opt_id_string")]
    pub product_id: Option<String>,
    pub product: Option<ProductRef>,
    pub name: Option<String>,
    pub variant: Option<String>,
    pub quantity: i32,
    #[serde(default, deserialize_with = "decimal")]
    pub price: BigDecimal,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        let name = row
            .product
            .map(|p| p.name)
            .or(row.name)
            .unwrap_or_default();
        OrderItem {
            product_id: row.product_id,
            name,
            variant: row.variant,
            quantity: row.quantity,
            unit_price: row.price,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PromoCodeRow {
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub order_number: i64,
    pub status: String,
    pub payment_status: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_type: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemRow>,
    #[serde(default, deserialize_with = "decimal")]
    pub subtotal: BigDecimal,
    #[serde(default, deserialize_with = "decimal")]
    pub discount: BigDecimal,
    #[serde(default, deserialize_with = "decimal")]
    pub delivery_fee: BigDecimal,
    #[serde(default, deserialize_with = "decimal")]
    pub total: BigDecimal,
    pub promo_code: Option<PromoCodeRow>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<OrderStatus>()
            .map_err(|e| invalid("order", e))?;
        let payment_status = row
            .payment_status
            .map(|s| s.parse::<PaymentStatus>())
            .transpose()
            .map_err(|e| invalid("order", e))?;

        Ok(Order {
            id: row.id,
            order_number: row.order_number,
            status,
            payment_status,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            delivery_address: row.delivery_address,
            delivery_type: row.delivery_type,
            items: row.items.into_iter().map(Into::into).collect(),
            subtotal: row.subtotal,
            discount: row.discount,
            delivery_fee: row.delivery_fee,
            total: row.total,
            promo_code: row.promo_code.map(|p| PromoCode { code: p.code }),
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

// ── Categories / banners ──────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CountRow {
    #[serde(default)]
    pub products: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRow {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    pub description: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "_count", default)]
    pub count: Option<CountRow>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            position: row.position,
            is_active: row.is_active,
            products_count: row.count.unwrap_or_default().products,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerRow {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: String,
    pub image: Option<String>,
    pub link_type: Option<String>,
    pub link_value: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl From<BannerRow> for Banner {
    fn from(row: BannerRow) -> Self {
        Banner {
            id: row.id,
            title: row.title,
            image: row.image,
            link_type: row.link_type.unwrap_or_else(|| "NONE".to_string()),
            link_value: row.link_value,
            position: row.position,
            is_active: row.is_active,
        }
    }
}

/// Body of a partial update; unset fields are omitted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<&EntityPatch> for PatchBody {
    fn from(patch: &EntityPatch) -> Self {
        PatchBody {
            position: patch.position,
            is_active: patch.is_active,
        }
    }
}
