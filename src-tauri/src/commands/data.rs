use crate::db::StoreExt;
use crate::models::{RecordId, RecordKey};
use serde_json::{Map, Value};
use tauri::AppHandle;

#[tauri::command]
pub fn get_data(app: AppHandle, table_name: String) -> Result<Vec<Value>, String> {
    app.store().get(&table_name).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn add_data(app: AppHandle, table_name: String, item: Value) -> Result<Vec<Value>, String> {
    app.store()
        .add(&table_name, item)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn update_data(
    app: AppHandle,
    table_name: String,
    id: RecordId,
    updates: Map<String, Value>,
) -> Result<Vec<Value>, String> {
    app.store()
        .update(&table_name, id, updates)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn delete_data(app: AppHandle, table_name: String, id: RecordKey) -> Result<Vec<Value>, String> {
    app.store()
        .delete(&table_name, id)
        .map_err(|e| e.to_string())
}
