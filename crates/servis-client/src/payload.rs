use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub email_or_user_name: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub name: String,
    pub surname: String,
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Customer address. Every field is always serialized, blank when unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub address_line: String,
    pub city: String,
    pub neighborhood: String,
    pub district: String,
    pub zip_code: String,
    pub country: String,
}

/// Body of `/api/Customers/CreateCustomer`.
///
/// The audit keys keep the API's own spellings (`cratedTime`,
/// `createadAt`). Times are `HH:mm:ss`, dates ISO-8601 UTC with
/// milliseconds. Unset optional fields are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    pub name: String,
    pub surname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub address: Address,
    /// 0 = Bireysel, 1 = Kurumsal.
    pub customer_type: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(rename = "cratedTime", skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(rename = "createadAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub is_deleted: bool,
}

/// Body of `/api/Products/CreateProduct`. Every field is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub description: String,
    pub customer_id: String,
    /// 0 = Telefon, 1 = Bilgisayar, 2 = Tablet, 3 = Diğer.
    pub product_type: u8,
    pub updated_time: String,
    pub updated_by: String,
    pub created_by: String,
    #[serde(rename = "cratedTime")]
    pub created_time: String,
    #[serde(rename = "createadAt")]
    pub created_at: String,
    pub updated_at: String,
    pub is_deleted: bool,
}
