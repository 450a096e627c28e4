//! Row model for the `duty` table.

use duties_core::duty::Duty;
use duties_core::types::{DutyId, Timestamp};
use sqlx::FromRow;

/// A row from the `duty` table.
#[derive(Debug, Clone, FromRow)]
pub struct DutyRow {
    pub id: DutyId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<DutyRow> for Duty {
    fn from(row: DutyRow) -> Self {
        Duty {
            id: row.id,
            name: row.name,
        }
    }
}
