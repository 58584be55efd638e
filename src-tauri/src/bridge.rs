//! Request/response bridge between the UI and the store.
//!
//! Requests are keyed by operation name (`get-data`, `save-bill`, ...). The
//! desktop build reaches the same store through Tauri commands; this module
//! is the transport-neutral dispatcher plus a line-delimited JSON loop used by
//! the headless build.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::db::Store;
use crate::error::StoreError;
use crate::models::{AddData, BillReceipt, DeleteData, NewBill, RecordId, Settings, Stats, UpdateData};

#[derive(Debug, Deserialize)]
#[serde(tag = "op", content = "payload", rename_all = "kebab-case")]
pub enum Request {
    GetData(String),
    AddData(AddData),
    DeleteData(DeleteData),
    UpdateData(UpdateData),
    SaveBill(NewBill),
    GetStats,
    GetServices,
    AddService(Value),
    DeleteService(RecordId),
    GetSettings,
    UpdateSettings(Map<String, Value>),
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Records(Vec<Value>),
    Receipt(BillReceipt),
    Stats(Stats),
    Settings(Settings),
}

pub fn dispatch(store: &Store, request: Request) -> Result<Reply, StoreError> {
    let reply = match request {
        Request::GetData(collection) => Reply::Records(store.get(&collection)?),
        Request::AddData(AddData { table_name, item }) => {
            Reply::Records(store.add(&table_name, item)?)
        }
        Request::DeleteData(DeleteData { table_name, id }) => {
            Reply::Records(store.delete(&table_name, id)?)
        }
        Request::UpdateData(UpdateData {
            table_name,
            id,
            updates,
        }) => Reply::Records(store.update(&table_name, id, updates)?),
        Request::SaveBill(bill) => Reply::Receipt(store.checkout(bill)?),
        Request::GetStats => Reply::Stats(store.stats()?),
        Request::GetServices => Reply::Records(store.get("services")?),
        Request::AddService(item) => Reply::Records(store.add_service(item)?),
        Request::DeleteService(id) => Reply::Records(store.delete("services", id)?),
        Request::GetSettings => Reply::Settings(store.settings()?),
        Request::UpdateSettings(updates) => Reply::Settings(store.update_settings(updates)?),
    };
    Ok(reply)
}

/// Reply envelope: `code` 0 on success, non-zero with a message otherwise.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Reply>,
}

impl Envelope {
    pub fn success(data: Reply) -> Self {
        Envelope {
            code: 0,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Envelope {
            code: 1,
            message: message.into(),
            data: None,
        }
    }
}

pub fn handle_line(store: &Store, line: &str) -> Envelope {
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed bridge request");
            return Envelope::error(format!("Malformed request: {e}"));
        }
    };

    match dispatch(store, request) {
        Ok(reply) => Envelope::success(reply),
        Err(e) => {
            tracing::error!(error = %e, "Bridge request failed");
            Envelope::error(e.to_string())
        }
    }
}

/// Answers one request per input line until the reader is exhausted.
pub fn serve<R: BufRead, W: Write>(store: &Store, reader: R, mut writer: W) -> std::io::Result<()> {
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let envelope = handle_line(store, &line);
        serde_json::to_writer(&mut writer, &envelope)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    Ok(())
}
