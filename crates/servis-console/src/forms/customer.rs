use servis_client::{Address, CustomerPayload};

use super::{FormClock, format_time, iso, parse_time};
use crate::validate::{FormErrors, is_email, is_phone};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CustomerType {
    #[default]
    Bireysel,
    Kurumsal,
}

impl CustomerType {
    pub fn code(self) -> u8 {
        match self {
            CustomerType::Bireysel => 0,
            CustomerType::Kurumsal => 1,
        }
    }
}

/// The create-customer form as typed. Times are `HH:mm[:ss]`, dates any
/// ISO-ish date or date-time (naive values are local).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub name: String,
    pub surname: String,
    pub phone_number: String,
    pub email: String,
    pub address: Address,
    pub customer_type: CustomerType,
    pub is_deleted: bool,
    pub updated_by: String,
    pub created_by: String,
    pub created_time: String,
    pub updated_time: String,
    pub created_at: String,
    pub updated_at: String,
}

impl CustomerForm {
    /// Prefill offered by the create dialog.
    pub fn example() -> Self {
        Self {
            name: "İlayda".into(),
            surname: "Koç".into(),
            phone_number: "+905316789012".into(),
            email: "ilayda.koc@example.com".into(),
            address: Address {
                address_line: "Yeşil Vadi Sitesi B Blok No:7".into(),
                city: "Bursa".into(),
                neighborhood: "Nilüfer".into(),
                district: "Osmangazi".into(),
                zip_code: "16010".into(),
                country: "Türkiye".into(),
            },
            customer_type: CustomerType::Kurumsal,
            is_deleted: false,
            updated_by: "admin".into(),
            created_by: "ilayda.koc".into(),
            created_time: "08:50:00".into(),
            updated_time: "13:25:00".into(),
            created_at: "2025-10-18T08:50:00.000Z".into(),
            updated_at: "2025-10-18T13:25:00.000Z".into(),
        }
    }

    /// The example as the raw JSON body the JSON tab starts with.
    pub fn example_json() -> String {
        let payload = CustomerPayload {
            name: "İlayda".into(),
            surname: "Koç".into(),
            phone_number: Some("+905316789012".into()),
            email: Some("ilayda.koc@example.com".into()),
            address: Self::example().address,
            customer_type: CustomerType::Kurumsal.code(),
            updated_time: Some("13:25:00".into()),
            updated_by: Some("admin".into()),
            created_by: Some("ilayda.koc".into()),
            created_time: Some("08:50:00".into()),
            created_at: Some("2025-10-18T08:50:00.000Z".into()),
            updated_at: Some("2025-10-18T13:25:00.000Z".into()),
            is_deleted: false,
        };
        serde_json::to_string_pretty(&payload).unwrap_or_default()
    }

    pub fn validate(&self, clock: &FormClock) -> Result<CustomerPayload, FormErrors> {
        let mut errors = FormErrors::new();

        if errors.require("name", &self.name, "Ad zorunludur") {
            errors.min_chars("name", &self.name, 2, "Ad en az 2 karakter olmalı");
        }
        if errors.require("surname", &self.surname, "Soyad zorunludur") {
            errors.min_chars("surname", &self.surname, 2, "Soyad en az 2 karakter olmalı");
        }
        if errors.require("phoneNumber", &self.phone_number, "Telefon zorunludur")
            && !is_phone(&self.phone_number)
        {
            errors.push(
                "phoneNumber",
                "Geçerli bir GSM numarası girin (örn. 05xx xxx xx xx)",
            );
        }
        if !self.email.trim().is_empty() && !is_email(&self.email) {
            errors.push("email", "Geçerli e-posta girin");
        }
        errors.require("address.city", &self.address.city, "Şehir zorunludur");
        errors.require("address.district", &self.address.district, "İlçe zorunludur");
        errors.require("address.country", &self.address.country, "Ülke zorunludur");
        errors.require("updatedBy", &self.updated_by, "Güncelleyen zorunludur");
        errors.require("createdBy", &self.created_by, "Oluşturan zorunludur");

        let updated_time = time_field(
            &mut errors,
            "updatedTime",
            &self.updated_time,
            "Güncelleme saati zorunludur",
        );
        let created_time = time_field(
            &mut errors,
            "cratedTime",
            &self.created_time,
            "Oluşturma saati zorunludur",
        );
        let created_at = date_field(
            &mut errors,
            clock,
            "createadAt",
            &self.created_at,
            "Oluşturma tarihi zorunludur",
        );
        let updated_at = date_field(
            &mut errors,
            clock,
            "updatedAt",
            &self.updated_at,
            "Güncelleme tarihi zorunludur",
        );

        if let (Some(created), Some(updated)) = (created_at, updated_at) {
            if updated < created {
                errors.push(
                    "updatedAt",
                    "Güncelleme tarihi, oluşturma tarihinden önce olamaz",
                );
            } else if clock.local_day(created) == clock.local_day(updated)
                && let (Some(start), Some(end)) = (created_time, updated_time)
                && end < start
            {
                errors.push(
                    "updatedTime",
                    "Güncelleme saati, aynı gün için oluşturma saatinden önce olamaz",
                );
            }
        }

        errors.finish(|| CustomerPayload {
            name: self.name.trim().to_string(),
            surname: self.surname.trim().to_string(),
            phone_number: Some(self.phone_number.trim().to_string()),
            email: Some(self.email.trim().to_string()).filter(|e| !e.is_empty()),
            address: self.address.clone(),
            customer_type: self.customer_type.code(),
            updated_time: updated_time.map(format_time),
            updated_by: Some(self.updated_by.trim().to_string()),
            created_by: Some(self.created_by.trim().to_string()),
            created_time: created_time.map(format_time),
            created_at: created_at.map(iso),
            updated_at: updated_at.map(iso),
            is_deleted: self.is_deleted,
        })
    }
}

fn time_field(
    errors: &mut FormErrors,
    field: &'static str,
    raw: &str,
    missing: &str,
) -> Option<chrono::NaiveTime> {
    if !errors.require(field, raw, missing) {
        return None;
    }
    let parsed = parse_time(raw);
    if parsed.is_none() {
        errors.push(field, "Geçersiz saat (SS:DD:ss)");
    }
    parsed
}

fn date_field(
    errors: &mut FormErrors,
    clock: &FormClock,
    field: &'static str,
    raw: &str,
    missing: &str,
) -> Option<chrono::DateTime<chrono::Utc>> {
    if !errors.require(field, raw, missing) {
        return None;
    }
    let parsed = clock.parse_date(raw);
    if parsed.is_none() {
        errors.push(field, "Geçersiz tarih");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn clock() -> FormClock {
        FormClock::fixed(Utc.with_ymd_and_hms(2025, 10, 18, 12, 0, 0).unwrap(), 180)
    }

    #[test]
    fn example_is_valid() {
        let payload = CustomerForm::example().validate(&clock()).unwrap();
        assert_eq!(payload.customer_type, 1);
        assert_eq!(payload.created_time.as_deref(), Some("08:50:00"));
        assert_eq!(payload.created_at.as_deref(), Some("2025-10-18T08:50:00.000Z"));
        assert_eq!(payload.address.zip_code, "16010");
    }

    #[test]
    fn example_json_matches_example_form() {
        let raw: serde_json::Value = serde_json::from_str(&CustomerForm::example_json()).unwrap();
        let form = serde_json::to_value(CustomerForm::example().validate(&clock()).unwrap()).unwrap();
        assert_eq!(raw, form);
    }

    #[test]
    fn empty_form_reports_required_fields() {
        let errors = CustomerForm::default().validate(&clock()).unwrap_err();
        assert_eq!(errors.field("name"), Some("Ad zorunludur"));
        assert_eq!(errors.field("phoneNumber"), Some("Telefon zorunludur"));
        assert_eq!(errors.field("address.city"), Some("Şehir zorunludur"));
        assert_eq!(errors.field("createadAt"), Some("Oluşturma tarihi zorunludur"));
        assert_eq!(errors.field("email"), None);
        assert_eq!(errors.field("address.zipCode"), None);
    }

    #[test]
    fn short_names_and_bad_contact() {
        let form = CustomerForm {
            name: "A".into(),
            phone_number: "12345".into(),
            email: "nope".into(),
            ..CustomerForm::example()
        };
        let errors = form.validate(&clock()).unwrap_err();
        assert_eq!(errors.field("name"), Some("Ad en az 2 karakter olmalı"));
        assert!(errors.field("phoneNumber").unwrap().starts_with("Geçerli bir GSM"));
        assert_eq!(errors.field("email"), Some("Geçerli e-posta girin"));
    }

    #[test]
    fn update_date_before_creation() {
        let form = CustomerForm {
            updated_at: "2025-10-17T13:25:00.000Z".into(),
            ..CustomerForm::example()
        };
        let errors = form.validate(&clock()).unwrap_err();
        assert_eq!(
            errors.field("updatedAt"),
            Some("Güncelleme tarihi, oluşturma tarihinden önce olamaz")
        );
    }

    #[test]
    fn same_day_update_time_before_creation() {
        let form = CustomerForm {
            updated_time: "07:00".into(),
            ..CustomerForm::example()
        };
        let errors = form.validate(&clock()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.field("updatedTime").unwrap().contains("aynı gün"));

        let next_day = CustomerForm {
            updated_time: "07:00".into(),
            updated_at: "2025-10-19T13:25:00.000Z".into(),
            ..CustomerForm::example()
        };
        assert!(next_day.validate(&clock()).is_ok());
    }

    #[test]
    fn blank_optional_fields_are_normalized() {
        let form = CustomerForm {
            email: "  ".into(),
            address: Address {
                city: "Bursa".into(),
                district: "Nilüfer".into(),
                country: "Türkiye".into(),
                ..Address::default()
            },
            ..CustomerForm::example()
        };
        let payload = form.validate(&clock()).unwrap();
        assert_eq!(payload.email, None);
        assert_eq!(payload.address.address_line, "");
        assert!(!payload.is_deleted);
    }
}
