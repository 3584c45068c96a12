use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::catalog::{Advertisement, CatalogSnapshot, Product};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogSource;
use crate::schema::{advertisements, products};

use super::models::{AdvertisementRow, ProductRow};

/// Loads catalog snapshots for the feed to publish.
#[derive(Clone)]
pub struct DieselCatalogSource {
    pool: DbPool,
}

impl DieselCatalogSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CatalogSource for DieselCatalogSource {
    fn snapshot(&self) -> Result<CatalogSnapshot, DomainError> {
        let mut conn = self.pool.get()?;

        let product_rows = products::table
            .select(ProductRow::as_select())
            .order(products::name.asc())
            .load(&mut conn)?;

        let ad_rows = advertisements::table
            .select(AdvertisementRow::as_select())
            .order(advertisements::created_at.asc())
            .load(&mut conn)?;

        Ok(CatalogSnapshot {
            products: product_rows
                .into_iter()
                .map(|p| Product {
                    id: p.id,
                    name: p.name,
                    price: p.price,
                    image: p.image,
                    description: p.description,
                })
                .collect(),
            advertisements: ad_rows
                .into_iter()
                .map(|a| Advertisement {
                    id: a.id,
                    image: a.image,
                })
                .collect(),
        })
    }
}
