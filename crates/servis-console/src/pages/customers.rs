use serde_json::Value;
use servis_client::{ServisClient, Transport};
use servis_core::{Column, PREFERRED_ORDER, Record, Titles, build_columns, build_field_paths};

use super::CreateMode;
use crate::forms::FormClock;
use crate::forms::customer::CustomerForm;
use crate::notify::Notification;
use crate::table::{TableError, TableOptions, render_table};
use crate::validate::FormErrors;

/// State of the "Yeni Müşteri" dialog.
#[derive(Debug, Clone, Default)]
pub struct CreateDialog {
    pub mode: CreateMode,
    pub form: CustomerForm,
    pub raw_json: String,
    /// Problems from the last form submission.
    pub errors: FormErrors,
}

/// Customer list view: fetch, tabulate, create and delete.
///
/// Every successful mutation is followed by a full refetch; the list is
/// never patched locally.
pub struct CustomersPage<'a, T: Transport> {
    client: &'a ServisClient<T>,
    titles: Titles,
    records: Vec<Record>,
    columns: Vec<Column>,
    dialog: Option<CreateDialog>,
    pending_delete: Option<String>,
    notifications: Vec<Notification>,
}

impl<'a, T: Transport> CustomersPage<'a, T> {
    pub fn new(client: &'a ServisClient<T>) -> Self {
        let titles = Titles::turkish();
        let columns = columns_for(&[], &titles);
        Self {
            client,
            titles,
            records: Vec::new(),
            columns,
            dialog: None,
            pending_delete: None,
            notifications: Vec::new(),
        }
    }

    // ── List ────────────────────────────────────────────────────

    /// Fetch the list and rebuild the columns from it. On failure the
    /// previous records stay in place.
    pub fn load(&mut self) -> bool {
        match self.client.fetch_customers() {
            Ok(records) => {
                self.columns = columns_for(&records, &self.titles);
                self.records = records;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "customer list failed");
                self.notify(Notification::from_api_error(&err));
                false
            }
        }
    }

    pub fn refresh(&mut self) -> bool {
        self.load()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn render(&self, options: &TableOptions) -> Result<String, TableError> {
        render_table(&self.columns, &self.records, options)
    }

    // ── Create ──────────────────────────────────────────────────

    pub fn open_create(&mut self) {
        self.dialog = Some(CreateDialog::default());
    }

    /// Fill both the form and the JSON tab with the example customer.
    pub fn fill_example(&mut self) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.form = CustomerForm::example();
            dialog.raw_json = CustomerForm::example_json();
        }
    }

    pub fn dialog(&self) -> Option<&CreateDialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut CreateDialog> {
        self.dialog.as_mut()
    }

    pub fn close_create(&mut self) {
        self.dialog = None;
    }

    /// Validate, send one create request, refetch and close the dialog.
    /// Any failure keeps the dialog open and issues no refetch.
    pub fn submit_create(&mut self, clock: &FormClock) -> bool {
        let Some(dialog) = self.dialog.as_mut() else {
            return false;
        };
        let body = match create_body(dialog, clock) {
            Ok(body) => body,
            Err(notification) => {
                self.notify(notification);
                return false;
            }
        };

        match self.client.create_customer(&body) {
            Ok(record) => {
                tracing::info!(id = ?record.get("id"), "customer created");
                self.notify(Notification::success("Müşteri oluşturuldu"));
                self.load();
                self.dialog = None;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "customer create failed");
                self.notify(Notification::from_api_error(&err));
                false
            }
        }
    }

    // ── Delete / edit ───────────────────────────────────────────

    /// Ask for confirmation; nothing is sent yet.
    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.pending_delete.clone() else {
            return false;
        };
        match self.client.delete_customer(&id) {
            Ok(()) => {
                tracing::info!(%id, "customer deleted");
                self.notify(Notification::success("Müşteri başarıyla silindi"));
                self.pending_delete = None;
                self.load();
                true
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "customer delete failed");
                self.notify(Notification::from_api_error(&err));
                false
            }
        }
    }

    pub fn edit(&mut self, _id: &str) {
        self.notify(Notification::info("Müşteri güncelleme özelliği yakında gelecek"));
    }

    // ── Notifications ───────────────────────────────────────────

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}

/// The record's `id` as text, when it has a usable one.
pub fn record_id(record: &Record) -> Option<String> {
    match record.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn columns_for(records: &[Record], titles: &Titles) -> Vec<Column> {
    build_columns(&build_field_paths(records), titles, &PREFERRED_ORDER)
}

fn create_body(dialog: &mut CreateDialog, clock: &FormClock) -> Result<Value, Notification> {
    match dialog.mode {
        CreateMode::Json => {
            let raw = match dialog.raw_json.trim() {
                "" => "{}",
                raw => raw,
            };
            serde_json::from_str(raw)
                .map_err(|_| Notification::error("Geçersiz JSON. Lütfen kontrol edin."))
        }
        CreateMode::Form => match dialog.form.validate(clock) {
            Ok(payload) => {
                dialog.errors = FormErrors::new();
                serde_json::to_value(payload).map_err(|e| Notification::error(e.to_string()))
            }
            Err(errors) => {
                let notification = Notification::from_form(&errors);
                dialog.errors = errors;
                Err(notification)
            }
        },
    }
}
