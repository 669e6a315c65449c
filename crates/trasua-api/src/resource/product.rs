//! # Product Resource
//!
//! Catalog calls under `/sanpham`.

use reqwest::Method;
use tracing::debug;

use trasua_core::{Product, ProductDraft, ProductId};

use crate::client::ApiClient;
use crate::error::ClientResult;

/// Catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let menu = client.products().list().await?;
/// let matcha = client.products().get(&"665f1c2ab1".into()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductResource {
    client: ApiClient,
}

impl ProductResource {
    pub fn new(client: ApiClient) -> Self {
        ProductResource { client }
    }

    /// Every product, including sold-out ones.
    pub async fn list(&self) -> ClientResult<Vec<Product>> {
        let path = "/sanpham";
        let products: Vec<Product> = self
            .client
            .fetch(self.client.request(Method::GET, path), path)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    pub async fn get(&self, id: &ProductId) -> ClientResult<Product> {
        let path = format!("/sanpham/{}", id);
        self.client
            .fetch(self.client.request(Method::GET, &path), &path)
            .await
    }

    /// Server-side search by keyword.
    pub async fn search(&self, query: &str) -> ClientResult<Vec<Product>> {
        let query = query.trim();
        debug!(query = %query, "Searching products");

        let path = "/sanpham/search";
        let builder = self
            .client
            .request(Method::GET, path)
            .query(&[("q", query)]);
        let products: Vec<Product> = self.client.fetch(builder, path).await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    pub async fn create(&self, draft: &ProductDraft) -> ClientResult<Product> {
        let path = "/sanpham";
        let builder = self.client.request(Method::POST, path).json(draft);
        self.client.fetch(builder, path).await
    }

    pub async fn update(&self, id: &ProductId, draft: &ProductDraft) -> ClientResult<Product> {
        let path = format!("/sanpham/{}", id);
        let builder = self.client.request(Method::PUT, &path).json(draft);
        self.client.fetch(builder, &path).await
    }

    pub async fn delete(&self, id: &ProductId) -> ClientResult<()> {
        let path = format!("/sanpham/{}", id);
        self.client
            .execute(self.client.request(Method::DELETE, &path), &path)
            .await
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiConfig;
    use crate::error::ClientError;
    use serde_json::json;
    use trasua_core::{Money, ProductStatus};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(ApiConfig::new(format!("{}/api", server.uri()))).unwrap()
    }

    fn product_json(id: &str, name: &str) -> serde_json::Value {
        json!({
            "_id": id,
            "ten": name,
            "moTa": "",
            "gia": 30000,
            "soLuong": 5,
            "danhMuc": "Trà Sữa Truyền Thống",
            "trangThai": "co_san"
        })
    }

    #[tokio::test]
    async fn test_list_products() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sanpham"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [product_json("p1", "Trà Sữa Trân Châu"), product_json("p2", "Hồng Trà")]
            })))
            .mount(&server)
            .await;

        let products = client_for(&server).products().list().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].name, "Hồng Trà");
        assert_eq!(products[0].price, Money::from_dong(30_000));
    }

    #[tokio::test]
    async fn test_search_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sanpham/search"))
            .and(query_param("q", "trà đào"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": [product_json("p9", "Trà Đào")]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let found = client_for(&server)
            .products()
            .search("  trà đào ")
            .await
            .unwrap();
        assert_eq!(found[0].id.as_str(), "p9");
    }

    #[tokio::test]
    async fn test_create_sends_wire_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/sanpham"))
            .and(body_json(json!({
                "ten": "Trà Sữa Khoai Môn",
                "moTa": "",
                "gia": 32000,
                "soLuong": 20,
                "danhMuc": "Trà Sữa Đặc Biệt",
                "trangThai": "co_san"
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"data": product_json("new1", "Trà Sữa Khoai Môn")})),
            )
            .mount(&server)
            .await;

        let draft = ProductDraft {
            name: "Trà Sữa Khoai Môn".to_string(),
            description: String::new(),
            price: Money::from_dong(32_000),
            stock: 20,
            category: "Trà Sữa Đặc Biệt".to_string(),
            status: ProductStatus::Available,
        };
        let created = client_for(&server).products().create(&draft).await.unwrap();
        assert_eq!(created.id.as_str(), "new1");
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sanpham/nope"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"message": "Không tìm thấy sản phẩm"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .products()
            .get(&ProductId::new("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotFound { ref path } if path == "/sanpham/nope"));
    }

    #[tokio::test]
    async fn test_delete_product() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/sanpham/p1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "Đã xóa"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .products()
            .delete(&ProductId::new("p1"))
            .await
            .unwrap();
    }
}
