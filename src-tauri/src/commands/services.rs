use crate::db::StoreExt;
use crate::models::{RecordId, Service};
use crate::screens::settings;
use serde_json::Value;
use tauri::AppHandle;

#[tauri::command]
pub fn get_services(app: AppHandle) -> Result<Vec<Value>, String> {
    app.store().get("services").map_err(|e| e.to_string())
}

#[tauri::command]
pub fn add_service(app: AppHandle, item: Value) -> Result<Vec<Value>, String> {
    app.store().add_service(item).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn delete_service(app: AppHandle, id: RecordId) -> Result<Vec<Value>, String> {
    app.store()
        .delete("services", id)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn add_menu_service(
    app: AppHandle,
    name: String,
    price: String,
    category: Option<String>,
) -> Result<Vec<Service>, String> {
    settings::add_service(app.store(), &name, &price, category.as_deref()).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn reprice_service(app: AppHandle, id: RecordId, price: f64) -> Result<Vec<Service>, String> {
    settings::reprice_service(app.store(), id, price).map_err(|e| e.to_string())
}
