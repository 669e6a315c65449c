//! # Product Commands
//!
//! The customer menu and the admin product screens.
//!
//! ## Menu Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  trasua> menu --search matcha --category "Trà Sữa Đặc Biệt"             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GET /sanpham (whole catalog)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ShopFilter: purchasable only (co_san and stock > 0)                    │
//! │              + search on name/description                               │
//! │              + category tab                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<ProductDto> with resolved image URLs                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use trasua_core::validation::validate_product_draft;
use trasua_core::{Money, Product, ProductDraft, ProductId, ShopFilter};

use crate::error::AppResult;
use crate::state::{ConfigState, Session};

/// Product as the shell shows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub price_display: String,
    pub stock: i64,
    pub category: String,
    pub status: String,
    pub status_label: String,
    /// Absolute URL, or empty when the product has no image.
    pub image_url: String,
    pub purchasable: bool,
}

impl ProductDto {
    pub fn new(product: Product, config: &ConfigState) -> Self {
        ProductDto {
            image_url: config.image_url(product.image.as_deref()),
            price_display: config.format_currency(product.price),
            purchasable: product.is_purchasable(),
            status: product.status.code().to_string(),
            status_label: product.status.label().to_string(),
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category: product.category,
        }
    }
}

fn to_dtos(products: Vec<Product>, config: &ConfigState) -> Vec<ProductDto> {
    products
        .into_iter()
        .map(|p| ProductDto::new(p, config))
        .collect()
}

/// Products a customer can order right now.
pub async fn list_shop_products(
    session: &Session,
    filter: ShopFilter,
) -> AppResult<Vec<ProductDto>> {
    debug!(search = ?filter.search, category = ?filter.category, "list_shop_products command");

    let products = session.api().products().list().await?;
    let shown = filter.apply(products);

    debug!(count = shown.len(), "Menu filtered");
    Ok(to_dtos(shown, session.config()))
}

pub async fn get_product(session: &Session, id: &ProductId) -> AppResult<ProductDto> {
    debug!(id = %id, "get_product command");
    let product = session.api().products().get(id).await?;
    Ok(ProductDto::new(product, session.config()))
}

/// Whole catalog for the admin screen, sold-out products included.
pub async fn list_products(session: &Session) -> AppResult<Vec<ProductDto>> {
    debug!("list_products command");
    let products = session.api().products().list().await?;
    Ok(to_dtos(products, session.config()))
}

/// Server-side keyword search. An empty query lists everything.
pub async fn search_products(session: &Session, query: &str) -> AppResult<Vec<ProductDto>> {
    let query = query.trim();
    debug!(query = %query, "search_products command");

    if query.is_empty() {
        return list_products(session).await;
    }

    let products = session.api().products().search(query).await?;
    Ok(to_dtos(products, session.config()))
}

/// Validates the form, then creates the product.
pub async fn create_product(session: &Session, draft: ProductDraft) -> AppResult<ProductDto> {
    debug!(name = %draft.name, "create_product command");
    validate_product_draft(&draft)?;

    let product = session.api().products().create(&draft).await?;
    info!(id = %product.id, name = %product.name, "Product created");
    Ok(ProductDto::new(product, session.config()))
}

pub async fn update_product(
    session: &Session,
    id: &ProductId,
    draft: ProductDraft,
) -> AppResult<ProductDto> {
    debug!(id = %id, "update_product command");
    validate_product_draft(&draft)?;

    let product = session.api().products().update(id, &draft).await?;
    info!(id = %product.id, "Product updated");
    Ok(ProductDto::new(product, session.config()))
}

pub async fn delete_product(session: &Session, id: &ProductId) -> AppResult<()> {
    debug!(id = %id, "delete_product command");
    session.api().products().delete(id).await?;
    info!(id = %id, "Product deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{envelope, product_json, session_for};
    use crate::error::ErrorCode;
    use serde_json::json;
    use trasua_core::ProductStatus;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_catalog(server: &MockServer) {
        let mut sold_out = product_json("p3", "Trà Đào", 28_000, 9);
        sold_out["trangThai"] = json!("het_hang");

        Mock::given(method("GET"))
            .and(path("/api/sanpham"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
                product_json("p1", "Trà Sữa Trân Châu", 25_000, 10),
                product_json("p2", "Trà Sữa Matcha", 35_000, 0),
                sold_out,
            ]))))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_shop_menu_shows_purchasable_only() {
        let server = MockServer::start().await;
        mount_catalog(&server).await;
        let session = session_for(&server);

        let menu = list_shop_products(&session, ShopFilter::default())
            .await
            .unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].id, "p1");
        assert_eq!(menu[0].price_display, "25.000 ₫");
        assert_eq!(
            menu[0].image_url,
            format!("{}/uploads/default.jpg", server.uri())
        );

        let admin = list_products(&session).await.unwrap();
        assert_eq!(admin.len(), 3);
        assert!(!admin[2].purchasable);
        assert_eq!(admin[2].status_label, "Hết Hàng");
    }

    #[tokio::test]
    async fn test_create_product_validates_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/sanpham"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;
        let session = session_for(&server);

        let draft = ProductDraft {
            name: "Trà Sữa Socola".to_string(),
            description: String::new(),
            price: Money::zero(),
            stock: 5,
            category: "Trà Sữa Đặc Biệt".to_string(),
            status: ProductStatus::Available,
        };
        let err = create_product(&session, draft).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "price must be positive");
    }

    #[tokio::test]
    async fn test_update_product() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/sanpham/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(product_json(
                "p1",
                "Trà Sữa Trân Châu Đường Đen",
                27_000,
                10,
            ))))
            .expect(1)
            .mount(&server)
            .await;
        let session = session_for(&server);

        let draft = ProductDraft {
            name: "Trà Sữa Trân Châu Đường Đen".to_string(),
            description: String::new(),
            price: Money::from_dong(27_000),
            stock: 10,
            category: "Trà Sữa Truyền Thống".to_string(),
            status: ProductStatus::Available,
        };
        let updated = update_product(&session, &ProductId::new("p1"), draft)
            .await
            .unwrap();
        assert_eq!(updated.price, Money::from_dong(27_000));
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sanpham/zzz"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let session = session_for(&server);

        let err = get_product(&session, &ProductId::new("zzz"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
