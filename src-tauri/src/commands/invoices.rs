use crate::db::StoreExt;
use crate::models::{Bill, RecordId};
use crate::screens::invoices;
use tauri::AppHandle;

#[tauri::command]
pub fn get_invoices(app: AppHandle, query: Option<String>) -> Result<Vec<Bill>, String> {
    let bills = invoices::load(app.store()).map_err(|e| e.to_string())?;

    match query {
        Some(query) => Ok(invoices::search(&bills, &query).into_iter().cloned().collect()),
        None => Ok(bills),
    }
}

#[tauri::command]
pub fn get_invoice(app: AppHandle, id: RecordId) -> Result<Option<Bill>, String> {
    let bills = app.store().bills().map_err(|e| e.to_string())?;

    Ok(invoices::find(&bills, id).cloned())
}
