use bigdecimal::BigDecimal;
use uuid::Uuid;

/// An orderable product as published by the catalog feed.
///
/// `price` is the amount charged per 100 grams. The cart and total
/// computation assume this denomination throughout.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub image: String,
    pub description: Option<String>,
}

/// A promotional banner image, published alongside the product list.
#[derive(Debug, Clone, PartialEq)]
pub struct Advertisement {
    pub id: Uuid,
    pub image: String,
}

/// Point-in-time view of the whole catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub advertisements: Vec<Advertisement>,
}

impl CatalogSnapshot {
    pub fn product(&self, id: Uuid) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Case-insensitive substring search over product names.
    pub fn search<'a>(&'a self, query: &str) -> Vec<&'a Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn product(name: &str) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price: BigDecimal::from(100),
            image: format!("https://img.example/{name}.jpg"),
            description: None,
        }
    }

    fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot {
            products: vec![product("Apple"), product("Pineapple"), product("Banana")],
            advertisements: vec![],
        }
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let snap = snapshot();
        let hits = snap.search("apple");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name, "Apple");
        assert_eq!(hits[1].name, "Pineapple");
    }

    #[test]
    fn blank_query_returns_everything() {
        let snap = snapshot();
        assert_eq!(snap.search("").len(), 3);
        assert_eq!(snap.search("   ").len(), 3);
    }

    #[test]
    fn search_with_no_match_is_empty() {
        assert!(snapshot().search("durian").is_empty());
    }

    #[test]
    fn product_lookup_by_id() {
        let snap = snapshot();
        let id = snap.products[1].id;
        assert_eq!(snap.product(id).map(|p| p.name.as_str()), Some("Pineapple"));
        assert!(snap.product(Uuid::new_v4()).is_none());
    }
}
