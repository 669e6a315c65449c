//! # Catalog Filter
//!
//! What the customer sees on the shop page: purchasable products only,
//! narrowed by a search box and a category tab.

use crate::types::Product;

/// Category tab value that shows every category.
pub const ALL_CATEGORIES: &str = "all";

/// Shop page filter. The default shows every purchasable product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopFilter {
    /// Case-insensitive match on name or description.
    pub search: Option<String>,
    /// Exact category name, or `None`/`"all"` for every category.
    pub category: Option<String>,
}

impl ShopFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if !product.is_purchasable() {
            return false;
        }

        if let Some(category) = self.category.as_deref() {
            if category != ALL_CATEGORIES && product.category != category {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                product.name.to_lowercase().contains(&term)
                    || product
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&term))
            }
            _ => true,
        }
    }

    /// Keeps catalog order.
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{ProductId, ProductStatus};

    fn product(id: &str, name: &str, category: &str, stock: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: Some(format!("{} thơm ngon", name)),
            price: Money::from_dong(30_000),
            stock,
            category: category.to_string(),
            status: ProductStatus::Available,
            image: None,
        }
    }

    fn menu() -> Vec<Product> {
        let mut sold_out = product("p4", "Trà Đào", "Trà Nguyên Chất", 8);
        sold_out.status = ProductStatus::SoldOut;
        vec![
            product("p1", "Trà Sữa Trân Châu", "Trà Sữa Truyền Thống", 10),
            product("p2", "Trà Sữa Xoài", "Trà Sữa Trái Cây", 3),
            product("p3", "Nước Ép Cam", "Nước Ép Trái Cây", 0),
            sold_out,
        ]
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_default_filter_hides_unpurchasable() {
        let shown = ShopFilter::default().apply(menu());
        assert_eq!(ids(&shown), vec!["p1", "p2"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let filter = ShopFilter {
            search: Some("XOÀI".to_string()),
            category: None,
        };
        assert_eq!(ids(&filter.apply(menu())), vec!["p2"]);

        let by_description = ShopFilter {
            search: Some("thơm".to_string()),
            category: None,
        };
        assert_eq!(by_description.apply(menu()).len(), 2);
    }

    #[test]
    fn test_category_filter() {
        let filter = ShopFilter {
            search: None,
            category: Some("Trà Sữa Truyền Thống".to_string()),
        };
        assert_eq!(ids(&filter.apply(menu())), vec!["p1"]);

        let all = ShopFilter {
            search: Some("  ".to_string()),
            category: Some(ALL_CATEGORIES.to_string()),
        };
        assert_eq!(all.apply(menu()).len(), 2);
    }
}
