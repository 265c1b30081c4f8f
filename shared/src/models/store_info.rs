//! Store Info Model

use serde::{Deserialize, Serialize};

/// Company/store record shown on the customer menu (single row)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StoreInfo {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub tax_id: Option<String>,
    /// Flat fee added to every delivery order total
    pub delivery_fee: f64,
}

/// Update store info payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreInfoUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub tax_id: Option<String>,
    pub delivery_fee: Option<f64>,
}
