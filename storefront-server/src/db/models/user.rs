//! User Model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User account row
///
/// `role` is `customer` or `admin`. The administrator record is seeded at
/// startup; there is no in-band role promotion.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
