use crate::db::StoreExt;
use crate::models::{BillReceipt, NewBill};
use crate::screens::billing::CheckoutForm;
use tauri::AppHandle;

/// Bill only; the caller handles the customer directory.
#[tauri::command]
pub fn save_bill(app: AppHandle, bill: NewBill) -> Result<BillReceipt, String> {
    app.store().checkout(bill).map_err(|e| e.to_string())
}

/// Validates the cart, then writes the bill and the customer visit together.
#[tauri::command]
pub fn checkout(app: AppHandle, form: CheckoutForm) -> Result<BillReceipt, String> {
    let mut session = form.into_session();
    session.submit(app.store()).map_err(|e| e.to_string())
}
