use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record identifier. Millisecond timestamps, kept unique by [`crate::ids::IdGenerator`].
pub type RecordId = i64;

/// A record that lives in one of the typed collections.
pub trait Record: Serialize + DeserializeOwned + Clone {
    fn id(&self) -> RecordId;
}

fn default_category() -> String {
    "General".to_string()
}

fn default_role() -> String {
    "Stylist".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: RecordId,
    pub name: String,
    pub price: f64,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: RecordId,
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `type` of a customer. Anything other than the two known tiers is kept as written.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub enum CustomerTier {
    #[default]
    Regular,
    #[serde(rename = "VIP")]
    Vip,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(rename = "type", default)]
    pub tier: CustomerTier,
    #[serde(default)]
    pub visits: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Customer {
    /// Customer created by a sale to an unknown phone number.
    pub fn first_visit(id: RecordId, name: &str, phone: &str, at: DateTime<Utc>) -> Self {
        Customer {
            id,
            name: name.to_string(),
            phone: phone.to_string(),
            tier: CustomerTier::Regular,
            visits: 1,
            created_at: Some(at),
            extra: Map::new(),
        }
    }
}

/// A line on a bill: a copy of the service record as it was when sold.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<&Service> for BillItem {
    fn from(service: &Service) -> Self {
        let mut extra = service.extra.clone();
        if let Some(created_at) = service.created_at {
            extra.insert("createdAt".to_string(), Value::String(created_at.to_rfc3339()));
        }
        BillItem {
            id: Some(service.id),
            name: service.name.clone(),
            price: service.price,
            category: Some(service.category.clone()),
            extra,
        }
    }
}

/// Payload of `save-bill`: everything but the id and date.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub items: Vec<BillItem>,
    pub total: f64,
    #[serde(default)]
    pub staff: String,
    #[serde(default)]
    pub payment_mode: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: RecordId,
    pub date: DateTime<Utc>,
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub items: Vec<BillItem>,
    pub total: f64,
    #[serde(default)]
    pub staff: String,
    #[serde(default)]
    pub payment_mode: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Bill {
    pub fn from_new(id: RecordId, date: DateTime<Utc>, bill: NewBill) -> Self {
        Bill {
            id,
            date,
            customer_name: bill.customer_name,
            customer_phone: bill.customer_phone,
            items: bill.items,
            total: bill.total,
            staff: bill.staff,
            payment_mode: bill.payment_mode,
            extra: Map::new(),
        }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Expense amounts were saved both as numbers and as form text.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Text is read like the expense form read it: the leading number,
    /// anything after it ignored (`"500 rs"` is 500, `"1,200"` is 1).
    pub fn value(&self) -> Option<f64> {
        match self {
            Amount::Number(n) => Some(*n),
            Amount::Text(s) => leading_number(s),
        }
    }
}

fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    text[..end].parse().ok()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    pub amount: Amount,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

macro_rules! impl_record {
    ($($ty:ty),*) => {
        $(impl Record for $ty {
            fn id(&self) -> RecordId {
                self.id
            }
        })*
    };
}

impl_record!(Service, StaffMember, Customer, Bill, Expense);

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub shop_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub gstin: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub theme: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            shop_name: "TS Saloon".to_string(),
            address: "Cuttack, Odisha".to_string(),
            gstin: String::new(),
            phone: String::new(),
            theme: "gold".to_string(),
            extra: Map::new(),
        }
    }
}

/// How a record is addressed on delete. Categories are plain strings, so they
/// are addressed by name.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum RecordKey {
    Id(RecordId),
    Name(String),
}

impl RecordKey {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            RecordKey::Id(id) => value.as_i64() == Some(*id),
            RecordKey::Name(name) => value.as_str() == Some(name.as_str()),
        }
    }
}

impl From<RecordId> for RecordKey {
    fn from(id: RecordId) -> Self {
        RecordKey::Id(id)
    }
}

impl From<&str> for RecordKey {
    fn from(name: &str) -> Self {
        RecordKey::Name(name.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddData {
    pub table_name: String,
    pub item: Value,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteData {
    pub table_name: String,
    pub id: RecordKey,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateData {
    pub table_name: String,
    pub id: RecordId,
    pub updates: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillReceipt {
    pub success: bool,
    pub bill_id: RecordId,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Stats {
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
    pub appointments: usize,
}
