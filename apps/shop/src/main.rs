//! # Trà Sữa Shop Entry Point
//!
//! Interactive shell for the milk tea shop: browse the menu, customize
//! drinks, fill the cart and place orders, plus the admin screens for
//! products and orders.
//!
//! ```text
//! $ TRASUA_API_BASE_URL=http://localhost:5000/api trasua-shop
//! trasua> menu --category "Trà Sữa Đặc Biệt"
//! trasua> add 665f1c... --sweetness less --ice none
//! trasua> checkout --name "Nguyễn Văn A" --phone 0901234567 --address "12 Lê Lợi"
//! trasua> admin orders --status cho_xac_nhan
//! trasua> exit
//! ```

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The actual setup is in lib.rs for better testability
    trasua_shop::run().await
}
