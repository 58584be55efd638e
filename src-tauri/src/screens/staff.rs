use serde::{Deserialize, Serialize};
use serde_json::json;

use super::FormError;
use crate::db::Store;
use crate::error::StoreError;
use crate::models::{RecordId, StaffMember};

/// Roles offered by the staff form. Stored as plain text, so others are kept as-is.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaffRole {
    #[default]
    Stylist,
    Doctor,
    Assistant,
    Receptionist,
}

impl StaffRole {
    pub const ALL: [StaffRole; 4] = [
        StaffRole::Stylist,
        StaffRole::Doctor,
        StaffRole::Assistant,
        StaffRole::Receptionist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Stylist => "Stylist",
            StaffRole::Doctor => "Doctor",
            StaffRole::Assistant => "Assistant",
            StaffRole::Receptionist => "Receptionist",
        }
    }
}

pub fn load(store: &Store) -> Result<Vec<StaffMember>, StoreError> {
    store.staff()
}

pub fn add(store: &Store, name: &str, role: StaffRole) -> Result<Vec<StaffMember>, FormError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FormError::MissingName);
    }

    store.add(
        "staff",
        json!({ "name": name, "role": role.as_str(), "active": true }),
    )?;
    Ok(load(store)?)
}

pub fn remove(store: &Store, id: RecordId) -> Result<Vec<StaffMember>, StoreError> {
    store.delete("staff", id)?;
    load(store)
}

/// Names for the "Attended By" picker on the billing screen.
pub fn attendants(staff: &[StaffMember]) -> Vec<&str> {
    staff
        .iter()
        .filter(|member| member.active)
        .map(|member| member.name.as_str())
        .collect()
}
