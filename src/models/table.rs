use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub capacity: i32,
    pub active: bool,
}
