use servis_client::{ServisClient, Transport};

use crate::forms::account::LoginForm;
use crate::navigation::{Navigation, Route, guard};
use crate::notify::Notification;

pub struct LoginPage<'a, T: Transport> {
    client: &'a ServisClient<T>,
    notifications: Vec<Notification>,
}

impl<'a, T: Transport> LoginPage<'a, T> {
    pub fn new(client: &'a ServisClient<T>) -> Self {
        Self {
            client,
            notifications: Vec::new(),
        }
    }

    /// Where to go when the login screen is opened.
    pub fn mount(&self) -> Navigation {
        guard(Route::Login, self.client.session())
    }

    /// Returns the route to move to after a successful login.
    pub fn submit(&mut self, form: &LoginForm) -> Option<Route> {
        let payload = match form.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                self.notify(Notification::from_form(&errors));
                return None;
            }
        };

        match self.client.login(&payload) {
            Ok(outcome) if outcome.token.is_some() => {
                self.notify(Notification::success("Giriş başarılı"));
                Some(Route::Dashboard)
            }
            Ok(_) => {
                self.notify(Notification::error(
                    "Giriş başarılı görünüyor ancak oturum anahtarı alınamadı",
                ));
                None
            }
            Err(err) => {
                self.notify(Notification::from_api_error(&err));
                None
            }
        }
    }

    pub fn logout(&mut self) -> Route {
        match self.client.logout() {
            Ok(()) => self.notify(Notification::success("Çıkış yapıldı")),
            Err(err) => self.notify(Notification::from_api_error(&err)),
        }
        Route::Login
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}
