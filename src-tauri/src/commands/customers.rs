use crate::db::StoreExt;
use crate::models::Customer;
use crate::screens::customers;
use tauri::AppHandle;

#[tauri::command]
pub fn get_customers(app: AppHandle) -> Result<Vec<Customer>, String> {
    customers::load(app.store()).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn search_customers(app: AppHandle, query: String) -> Result<Vec<Customer>, String> {
    let all = customers::load(app.store()).map_err(|e| e.to_string())?;

    Ok(customers::search(&all, &query).into_iter().cloned().collect())
}

#[tauri::command]
pub fn add_customer(app: AppHandle, name: String, phone: String) -> Result<Vec<Customer>, String> {
    customers::add(app.store(), &name, &phone).map_err(|e| e.to_string())
}
