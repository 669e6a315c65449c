//! # Domain Types
//!
//! Core domain types used throughout the shop client.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Order      │   │  Customization  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  _id            │   │  _id            │   │  sweetness      │       │
//! │  │  ten (name)     │   │  ten_khach      │   │  ice            │       │
//! │  │  gia (price)    │   │  trang_thai     │   │  note           │       │
//! │  │  soLuong (stock)│   │  tong_tien      │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Sweetness     │   │      Ice        │   │  OrderStatus    │       │
//! │  │  it_ngot        │   │  khong          │   │  cho_xac_nhan   │       │
//! │  │  vua (default)  │   │  it             │   │  dang_xu_ly     │       │
//! │  │  ngot           │   │  vua (default)  │   │  hoan_thanh     │       │
//! │  └─────────────────┘   │  nhieu          │   │  da_huy         │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! The shop service speaks Vietnamese field names (`ten`, `gia`, `soLuong`,
//! `trang_thai`, ...). Rust fields use English names and `serde(rename)`
//! maps them, so nothing outside this module needs to know the wire form.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartProduct;
use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product Identity
// =============================================================================

/// Opaque product identifier assigned by the shop service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId(id)
    }
}

// =============================================================================
// Product
// =============================================================================

/// Whether a product is offered on the menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ProductStatus {
    /// On the menu.
    #[default]
    #[serde(rename = "co_san")]
    Available,
    /// Taken off the menu by an admin.
    #[serde(rename = "het_hang")]
    SoldOut,
}

impl ProductStatus {
    pub const fn code(&self) -> &'static str {
        match self {
            ProductStatus::Available => "co_san",
            ProductStatus::SoldOut => "het_hang",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            ProductStatus::Available => "Có Sẵn",
            ProductStatus::SoldOut => "Hết Hàng",
        }
    }
}

impl FromStr for ProductStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "co_san" | "available" => Ok(ProductStatus::Available),
            "het_hang" | "sold_out" => Ok(ProductStatus::SoldOut),
            _ => Err(ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: vec!["co_san".to_string(), "het_hang".to_string()],
            }),
        }
    }
}

/// A product as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,

    /// Display name.
    #[serde(rename = "ten")]
    pub name: String,

    #[serde(rename = "moTa", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Current unit price. Carts keep their own snapshot of it.
    #[serde(rename = "gia")]
    pub price: Money,

    /// Units left in stock. This is the stock limit for the cart.
    #[serde(rename = "soLuong", default)]
    pub stock: i64,

    #[serde(rename = "danhMuc", default)]
    pub category: String,

    #[serde(rename = "trangThai", default)]
    pub status: ProductStatus,

    /// Image path or URL, resolved against the server host for display.
    #[serde(rename = "hinhAnh", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    /// Maximum quantity a customer can put in the cart.
    ///
    /// Negative stock reported by the service counts as zero.
    pub fn stock_limit(&self) -> u32 {
        u32::try_from(self.stock.max(0)).unwrap_or(u32::MAX)
    }

    /// Checks if the product can be ordered at all.
    pub fn is_purchasable(&self) -> bool {
        self.status == ProductStatus::Available && self.stock > 0
    }

    /// The slice of product data the cart needs.
    pub fn to_cart_product(&self) -> CartProduct {
        CartProduct::new(
            self.id.clone(),
            self.name.clone(),
            self.price,
            self.stock_limit(),
        )
    }
}

/// Body of the admin create/update product calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductDraft {
    #[serde(rename = "ten")]
    pub name: String,

    #[serde(rename = "moTa", default)]
    pub description: String,

    #[serde(rename = "gia")]
    pub price: Money,

    #[serde(rename = "soLuong")]
    pub stock: i64,

    #[serde(rename = "danhMuc")]
    pub category: String,

    #[serde(rename = "trangThai", default)]
    pub status: ProductStatus,
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        ProductDraft {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price,
            stock: product.stock,
            category: product.category.clone(),
            status: product.status,
        }
    }
}

// =============================================================================
// Drink Customization
// =============================================================================

/// Sweetness level of a drink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Sweetness {
    #[serde(rename = "it_ngot")]
    Less,
    #[default]
    #[serde(rename = "vua")]
    Normal,
    #[serde(rename = "ngot")]
    More,
}

impl Sweetness {
    pub const ALL: [Sweetness; 3] = [Sweetness::Less, Sweetness::Normal, Sweetness::More];

    /// Code used on the wire and inside variant keys.
    pub const fn code(&self) -> &'static str {
        match self {
            Sweetness::Less => "it_ngot",
            Sweetness::Normal => "vua",
            Sweetness::More => "ngot",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Sweetness::Less => "Ít ngọt",
            Sweetness::Normal => "Vừa ngọt",
            Sweetness::More => "Ngọt",
        }
    }
}

impl fmt::Display for Sweetness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Sweetness {
    type Err = ValidationError;

    /// Accepts the wire code or the English name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "it_ngot" | "less" => Ok(Sweetness::Less),
            "vua" | "normal" => Ok(Sweetness::Normal),
            "ngot" | "more" => Ok(Sweetness::More),
            _ => Err(ValidationError::NotAllowed {
                field: "sweetness".to_string(),
                allowed: Sweetness::ALL.iter().map(|s| s.code().to_string()).collect(),
            }),
        }
    }
}

/// Ice level of a drink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Ice {
    #[serde(rename = "khong")]
    None,
    #[serde(rename = "it")]
    Less,
    #[default]
    #[serde(rename = "vua")]
    Normal,
    #[serde(rename = "nhieu")]
    More,
}

impl Ice {
    pub const ALL: [Ice; 4] = [Ice::None, Ice::Less, Ice::Normal, Ice::More];

    /// Code used on the wire and inside variant keys.
    pub const fn code(&self) -> &'static str {
        match self {
            Ice::None => "khong",
            Ice::Less => "it",
            Ice::Normal => "vua",
            Ice::More => "nhieu",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Ice::None => "Không đá",
            Ice::Less => "Ít đá",
            Ice::Normal => "Vừa đá",
            Ice::More => "Nhiều đá",
        }
    }
}

impl fmt::Display for Ice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Ice {
    type Err = ValidationError;

    /// Accepts the wire code or the English name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "khong" | "none" => Ok(Ice::None),
            "it" | "less" => Ok(Ice::Less),
            "vua" | "normal" => Ok(Ice::Normal),
            "nhieu" | "more" => Ok(Ice::More),
            _ => Err(ValidationError::NotAllowed {
                field: "ice".to_string(),
                allowed: Ice::ALL.iter().map(|i| i.code().to_string()).collect(),
            }),
        }
    }
}

/// Per-drink choices made in the customization dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customization {
    pub sweetness: Sweetness,
    pub ice: Ice,
    pub note: String,
}

impl Customization {
    pub fn with_sweetness(mut self, sweetness: Sweetness) -> Self {
        self.sweetness = sweetness;
        self
    }

    pub fn with_ice(mut self, ice: Ice) -> Self {
        self.ice = ice;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle of an order on the service side.
///
/// ## Admin Workflow
/// ```text
///  cho_xac_nhan ──confirm──► dang_xu_ly ──complete──► hoan_thanh
///       │                        │
///       └────────cancel──────────┴──────────────────► da_huy
///                                      (stock returned to the shelf)
/// ```
/// `da_xac_nhan`, `dang_giao` and `da_giao` are older states the service
/// still reports for historical orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderStatus {
    #[serde(rename = "cho_xac_nhan")]
    AwaitingConfirmation,
    #[serde(rename = "da_xac_nhan")]
    Confirmed,
    #[serde(rename = "dang_xu_ly")]
    Processing,
    #[serde(rename = "dang_giao")]
    Shipping,
    #[serde(rename = "da_giao")]
    Delivered,
    #[serde(rename = "hoan_thanh")]
    Completed,
    #[serde(rename = "da_huy")]
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::AwaitingConfirmation,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipping,
        OrderStatus::Delivered,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub const fn code(&self) -> &'static str {
        match self {
            OrderStatus::AwaitingConfirmation => "cho_xac_nhan",
            OrderStatus::Confirmed => "da_xac_nhan",
            OrderStatus::Processing => "dang_xu_ly",
            OrderStatus::Shipping => "dang_giao",
            OrderStatus::Delivered => "da_giao",
            OrderStatus::Completed => "hoan_thanh",
            OrderStatus::Cancelled => "da_huy",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            OrderStatus::AwaitingConfirmation => "Chờ Xác Nhận",
            OrderStatus::Confirmed => "Đã Xác Nhận",
            OrderStatus::Processing => "Đang Xử Lý",
            OrderStatus::Shipping => "Đang Giao",
            OrderStatus::Delivered => "Đã Giao",
            OrderStatus::Completed => "Hoàn Thành",
            OrderStatus::Cancelled => "Đã Hủy",
        }
    }

    /// Confirm moves an order from awaiting to processing.
    pub const fn can_confirm(&self) -> bool {
        matches!(self, OrderStatus::AwaitingConfirmation)
    }

    pub const fn can_complete(&self) -> bool {
        matches!(self, OrderStatus::Processing)
    }

    pub const fn can_cancel(&self) -> bool {
        matches!(
            self,
            OrderStatus::AwaitingConfirmation | OrderStatus::Processing
        )
    }

    /// Only finished orders may be deleted.
    pub const fn can_delete(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.code() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: OrderStatus::ALL
                    .iter()
                    .map(|status| status.code().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Order
// =============================================================================

/// One drink line of a placed order, priced at order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    #[serde(rename = "ten_san_pham")]
    pub product_name: String,

    #[serde(rename = "so_luong")]
    pub quantity: u32,

    /// Unit price frozen when the order was placed.
    #[serde(rename = "gia_tai_thoi_diem")]
    pub unit_price: Money,

    #[serde(rename = "thanh_tien")]
    pub line_total: Money,

    #[serde(rename = "muc_ngot", default, skip_serializing_if = "Option::is_none")]
    pub sweetness: Option<Sweetness>,

    #[serde(rename = "muc_da", default, skip_serializing_if = "Option::is_none")]
    pub ice: Option<Ice>,

    #[serde(rename = "ghi_chu", default)]
    pub note: String,
}

/// A placed order as the admin sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "ten_khach")]
    pub customer_name: String,

    #[serde(rename = "sdt")]
    pub phone: String,

    #[serde(rename = "dia_chi")]
    pub address: String,

    #[serde(rename = "ghi_chu_don_hang", default)]
    pub order_note: String,

    #[serde(rename = "trang_thai")]
    pub status: OrderStatus,

    #[serde(rename = "tong_tien")]
    pub total: Money,

    #[serde(rename = "ngay_dat")]
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,

    /// Only populated by the detail call.
    #[serde(rename = "san_phams", default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Last eight characters of the id, as printed on order slips.
    pub fn short_id(&self) -> &str {
        let start = self
            .id
            .char_indices()
            .rev()
            .nth(7)
            .map(|(i, _)| i)
            .unwrap_or(0);
        &self.id[start..]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
