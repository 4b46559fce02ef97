use servis_client::{ServisClient, Transport};

use crate::forms::account::RegisterForm;
use crate::navigation::Route;
use crate::notify::Notification;

pub struct RegisterPage<'a, T: Transport> {
    client: &'a ServisClient<T>,
    notifications: Vec<Notification>,
}

impl<'a, T: Transport> RegisterPage<'a, T> {
    pub fn new(client: &'a ServisClient<T>) -> Self {
        Self {
            client,
            notifications: Vec::new(),
        }
    }

    /// On success the user is sent to the login screen.
    pub fn submit(&mut self, form: &RegisterForm) -> Option<Route> {
        let payload = match form.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                self.notify(Notification::from_form(&errors));
                return None;
            }
        };
        match self.client.create_user(&payload) {
            Ok(_) => {
                self.notify(Notification::success("Kayıt başarılı, giriş yapabilirsiniz"));
                Some(Route::Login)
            }
            Err(err) => {
                self.notify(Notification::from_api_error(&err));
                None
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
