use crate::db::StoreExt;
use crate::models::{Settings, Stats};
use crate::screens::{dashboard, settings};
use serde_json::{Map, Value};
use tauri::AppHandle;

#[tauri::command]
pub fn get_stats(app: AppHandle) -> Result<Stats, String> {
    dashboard::load(app.store()).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_settings(app: AppHandle) -> Result<Settings, String> {
    settings::shop(app.store()).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn update_settings(app: AppHandle, updates: Map<String, Value>) -> Result<Settings, String> {
    settings::update_shop(app.store(), updates).map_err(|e| e.to_string())
}
