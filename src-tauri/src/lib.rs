pub mod bridge;
pub mod config;
pub mod db;
pub mod document;
pub mod error;
pub mod ids;
pub mod logging;
pub mod models;
pub mod screens;
pub mod storage;

#[cfg(feature = "desktop")]
mod commands;


pub use config::AppConfig;
pub use db::Store;
pub use error::StoreError;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use commands::{billing, categories, customers, data, invoices, reports, services, staff};
    use tauri::Manager;

    tauri::Builder::default()
        .setup(|app| {
            let config = AppConfig::from_env(app.path().app_data_dir()?)?;

            let guard = logging::init_with_file(&config.log_dir(), config.log_filter.as_deref())?;
            app.manage(guard);

            let store = config.open_store()?;
            app.manage(store);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Generic records
            data::get_data,
            data::add_data,
            data::update_data,
            data::delete_data,
            // Service menu
            services::get_services,
            services::add_service,
            services::delete_service,
            services::add_menu_service,
            services::reprice_service,
            // Categories
            categories::get_categories,
            categories::create_category,
            categories::delete_category,
            // Billing
            billing::save_bill,
            billing::checkout,
            // Customers
            customers::get_customers,
            customers::search_customers,
            customers::add_customer,
            // Staff
            staff::get_staff,
            staff::create_staff,
            staff::delete_staff,
            // Invoices
            invoices::get_invoices,
            invoices::get_invoice,
            // Dashboard and shop settings
            reports::get_stats,
            reports::get_settings,
            reports::update_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// Headless mode: serves bridge requests over stdin/stdout.
#[cfg(not(feature = "desktop"))]
pub fn run() {
    if let Err(e) = run_headless() {
        tracing::error!(error = %e, "Bridge stopped");
        eprintln!("luxe-salon: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "desktop"))]
fn run_headless() -> Result<(), StoreError> {
    let config = AppConfig::from_env(config::default_data_dir())?;
    logging::init(config.log_filter.as_deref());

    let store = config.open_store()?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    bridge::serve(&store, stdin.lock(), stdout.lock())?;
    Ok(())
}
