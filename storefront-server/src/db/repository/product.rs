//! Product Repository
//!
//! Catalog reads only — product rows are written by seeding/back-office
//! tooling, and the variant cascade on delete is schema-level.

use super::RepoResult;
use crate::db::models::{Product, ProductDetail, ProductSummary, VariantRow};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Every product with its representative first variant
    pub async fn find_all_with_main(&self) -> RepoResult<Vec<ProductSummary>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, category, brand, base_price, rating FROM products",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut summaries = Vec::with_capacity(products.len());
        for product in products {
            let main = sqlx::query_as::<_, VariantRow>(
                "SELECT id, product_id, color, size, price, discount, stock, images \
                 FROM variants WHERE product_id = ? ORDER BY id LIMIT 1",
            )
            .bind(product.id)
            .fetch_optional(&self.pool)
            .await?;

            summaries.push(ProductSummary {
                product,
                main_variant: main.map(VariantRow::into_variant),
            });
        }
        Ok(summaries)
    }

    /// One product with its full variant list
    pub async fn find_by_id_full(&self, id: i64) -> RepoResult<Option<ProductDetail>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, category, brand, base_price, rating \
             FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(product) = product else {
            return Ok(None);
        };

        let variants = sqlx::query_as::<_, VariantRow>(
            "SELECT id, product_id, color, size, price, discount, stock, images \
             FROM variants WHERE product_id = ? ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(ProductDetail {
            product,
            variants: variants.into_iter().map(VariantRow::into_variant).collect(),
        }))
    }
}
