//! Product and Variant Models
//!
//! 商品主表 + 变体 (颜色/尺码/价格/库存组合)。
//! 变体的 `images` 列以 JSON 文本存储，读取时解析为数组。

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Catalog product row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub base_price: Option<f64>,
    pub rating: Option<f64>,
}

/// Variant row as stored — `images` is still JSON text here
#[derive(Debug, Clone, FromRow)]
pub struct VariantRow {
    pub id: i64,
    pub product_id: i64,
    pub color: Option<String>,
    pub size: Option<String>,
    pub price: Option<f64>,
    pub discount: Option<i64>,
    pub stock: Option<i64>,
    pub images: Option<String>,
}

/// Variant with the image list decoded
#[derive(Debug, Clone, Serialize)]
pub struct Variant {
    pub id: i64,
    pub product_id: i64,
    pub color: Option<String>,
    pub size: Option<String>,
    pub price: Option<f64>,
    pub discount: Option<i64>,
    pub stock: Option<i64>,
    pub images: Vec<String>,
}

impl VariantRow {
    /// Decode the JSON image list; malformed text degrades to an empty list
    pub fn into_variant(self) -> Variant {
        let images = self
            .images
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
            .unwrap_or_default();
        Variant {
            id: self.id,
            product_id: self.product_id,
            color: self.color,
            size: self.size,
            price: self.price,
            discount: self.discount,
            stock: self.stock,
            images,
        }
    }
}

/// Product with its representative first variant (catalog listing)
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    #[serde(flatten)]
    pub product: Product,
    pub main_variant: Option<Variant>,
}

/// Product with every variant (product detail page)
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub variants: Vec<Variant>,
}
