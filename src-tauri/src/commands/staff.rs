use crate::db::StoreExt;
use crate::models::{RecordId, StaffMember};
use crate::screens::staff::{self, StaffRole};
use tauri::AppHandle;

#[tauri::command]
pub fn get_staff(app: AppHandle) -> Result<Vec<StaffMember>, String> {
    staff::load(app.store()).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn create_staff(
    app: AppHandle,
    name: String,
    role: Option<StaffRole>,
) -> Result<Vec<StaffMember>, String> {
    staff::add(app.store(), &name, role.unwrap_or_default()).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn delete_staff(app: AppHandle, id: RecordId) -> Result<Vec<StaffMember>, String> {
    // Bills keep the attendant's name, so removal never orphans history
    staff::remove(app.store(), id).map_err(|e| e.to_string())
}
