use crate::db::StoreExt;
use tauri::AppHandle;

#[tauri::command]
pub fn get_categories(app: AppHandle) -> Result<Vec<String>, String> {
    app.store().categories().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn create_category(app: AppHandle, name: String) -> Result<Vec<String>, String> {
    let store = app.store();

    store
        .add("categories", name.into())
        .map_err(|e| e.to_string())?;

    store.categories().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn delete_category(app: AppHandle, name: String) -> Result<Vec<String>, String> {
    let store = app.store();

    // Services keep their category text; only the tab goes away
    store
        .delete("categories", name.as_str())
        .map_err(|e| e.to_string())?;

    store.categories().map_err(|e| e.to_string())
}
