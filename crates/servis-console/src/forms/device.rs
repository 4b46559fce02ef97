use servis_client::ProductPayload;

use super::{FormClock, format_time, iso, parse_time};
use crate::validate::FormErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProductType {
    Telefon,
    Bilgisayar,
    Tablet,
    Diger,
}

impl ProductType {
    pub fn code(self) -> u8 {
        match self {
            ProductType::Telefon => 0,
            ProductType::Bilgisayar => 1,
            ProductType::Tablet => 2,
            ProductType::Diger => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProductType::Telefon => "Telefon",
            ProductType::Bilgisayar => "Bilgisayar",
            ProductType::Tablet => "Tablet",
            ProductType::Diger => "Diğer",
        }
    }
}

/// The create-device form as typed. Blank times and dates fall back to
/// the clock's "now".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceForm {
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub description: String,
    pub customer_id: String,
    pub product_type: Option<ProductType>,
    pub created_by: String,
    pub updated_by: String,
    pub created_time: String,
    pub updated_time: String,
    pub created_at: String,
    pub updated_at: String,
    pub is_deleted: bool,
}

impl DeviceForm {
    /// Prefill offered when the dialog opens, stamped with the current time.
    pub fn example(clock: &FormClock) -> Self {
        Self {
            brand: "Apple".into(),
            model: "iPhone 14".into(),
            serial_number: "SN-123456789".into(),
            description: "Ekran kırık, batarya zayıf".into(),
            customer_id: "3fa85f64-5717-4562-b3fc-2c963f66afa6".into(),
            product_type: Some(ProductType::Telefon),
            created_by: "admin".into(),
            updated_by: "admin".into(),
            created_time: clock.time_now(),
            updated_time: clock.time_now(),
            created_at: clock.iso_now(),
            updated_at: clock.iso_now(),
            is_deleted: false,
        }
    }

    pub fn example_json(clock: &FormClock) -> String {
        match Self::example(clock).validate(clock) {
            Ok(payload) => serde_json::to_string_pretty(&payload).unwrap_or_default(),
            Err(_) => String::new(),
        }
    }

    pub fn validate(&self, clock: &FormClock) -> Result<ProductPayload, FormErrors> {
        let mut errors = FormErrors::new();
        errors.require("brand", &self.brand, "Marka zorunludur");
        errors.require("model", &self.model, "Model zorunludur");
        errors.require("serialNumber", &self.serial_number, "Seri No zorunludur");
        if self.product_type.is_none() {
            errors.push("productType", "Ürün türü zorunludur");
        }
        errors.require("customerId", &self.customer_id, "Müşteri ID zorunludur (GUID)");
        errors.require("createdBy", &self.created_by, "Oluşturan zorunludur");
        errors.require("updatedBy", &self.updated_by, "Güncelleyen zorunludur");

        let created_time = time_or_now(&mut errors, clock, "cratedTime", &self.created_time);
        let updated_time = time_or_now(&mut errors, clock, "updatedTime", &self.updated_time);
        let created_at = date_or_now(&mut errors, clock, "createadAt", &self.created_at);
        let updated_at = date_or_now(&mut errors, clock, "updatedAt", &self.updated_at);

        errors.finish(|| ProductPayload {
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            serial_number: self.serial_number.trim().to_string(),
            description: self.description.trim().to_string(),
            customer_id: self.customer_id.trim().to_string(),
            product_type: self.product_type.map_or(0, ProductType::code),
            updated_time,
            updated_by: self.updated_by.trim().to_string(),
            created_by: self.created_by.trim().to_string(),
            created_time,
            created_at,
            updated_at,
            is_deleted: self.is_deleted,
        })
    }
}

fn time_or_now(
    errors: &mut FormErrors,
    clock: &FormClock,
    field: &'static str,
    raw: &str,
) -> String {
    if raw.trim().is_empty() {
        return clock.time_now();
    }
    match parse_time(raw) {
        Some(time) => format_time(time),
        None => {
            errors.push(field, "Geçersiz saat (SS:DD:ss)");
            String::new()
        }
    }
}

fn date_or_now(
    errors: &mut FormErrors,
    clock: &FormClock,
    field: &'static str,
    raw: &str,
) -> String {
    if raw.trim().is_empty() {
        return clock.iso_now();
    }
    match clock.parse_date(raw) {
        Some(dt) => iso(dt),
        None => {
            errors.push(field, "Geçersiz tarih");
            String::new()
        }
    }
}
