use serde_json::Value;
use servis_client::{ServisClient, Transport};
use servis_core::Record;

use super::CreateMode;
use crate::forms::FormClock;
use crate::forms::device::DeviceForm;
use crate::notify::Notification;
use crate::validate::FormErrors;

#[derive(Debug, Clone, Default)]
pub struct DeviceDialog {
    pub mode: CreateMode,
    pub form: DeviceForm,
    pub raw_json: String,
    pub errors: FormErrors,
}

/// Device screen: only creation exists so far.
pub struct DevicesPage<'a, T: Transport> {
    client: &'a ServisClient<T>,
    dialog: Option<DeviceDialog>,
    last_created: Option<Record>,
    notifications: Vec<Notification>,
}

impl<'a, T: Transport> DevicesPage<'a, T> {
    pub fn new(client: &'a ServisClient<T>) -> Self {
        Self {
            client,
            dialog: None,
            last_created: None,
            notifications: Vec::new(),
        }
    }

    /// Open the dialog prefilled with the example device in both tabs.
    pub fn open_create(&mut self, clock: &FormClock) {
        self.dialog = Some(DeviceDialog {
            mode: CreateMode::Form,
            form: DeviceForm::example(clock),
            raw_json: DeviceForm::example_json(clock),
            errors: FormErrors::new(),
        });
    }

    pub fn dialog(&self) -> Option<&DeviceDialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut DeviceDialog> {
        self.dialog.as_mut()
    }

    pub fn close_create(&mut self) {
        self.dialog = None;
    }

    pub fn last_created(&self) -> Option<&Record> {
        self.last_created.as_ref()
    }

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

        match self.client.create_product(&body) {
            Ok(record) => {
                self.notify(Notification::success("Cihaz oluşturuldu"));
                self.last_created = Some(record);
                self.dialog = None;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "device create failed");
                let notification = if err.details().is_empty() {
                    Notification::from_api_error(&err)
                } else {
                    Notification::error("Cihaz oluşturma hatası")
                        .with_details(err.details().iter().cloned())
                };
                self.notify(notification);
                false
            }
        }
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}

fn create_body(dialog: &mut DeviceDialog, clock: &FormClock) -> Result<Value, Notification> {
    match dialog.mode {
        CreateMode::Json => {
            let raw = match dialog.raw_json.trim() {
                "" => "{}",
                raw => raw,
            };
            serde_json::from_str(raw).map_err(|_| Notification::error("Geçersiz JSON"))
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
