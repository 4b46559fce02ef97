use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{Method, Request, Response};
use serde::Serialize;
use serde_json::json;
use servis_core::{Record, normalize_list, normalize_record};

use crate::auth::extract_token;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::payload::{LoginPayload, RegisterPayload};
use crate::session::SessionStore;
use crate::transport::{Transport, TransportError, UreqTransport};

pub mod endpoints {
    pub const LOGIN: &str = "/api/Auth/Login";
    pub const CREATE_USER: &str = "/api/Users/CreateUser";
    pub const CREATE_CUSTOMER: &str = "/api/Customers/CreateCustomer";
    pub const LIST_CUSTOMERS: &str = "/api/Customers/GetAll";
    pub const DELETE_CUSTOMER: &str = "/api/Customers/CustomerDelete";
    pub const CREATE_PRODUCT: &str = "/api/Products/CreateProduct";
}

const ACCEPT_ANY: &str = "application/json, text/plain, */*";

/// Result of a successful login call.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// `None` when the server answered 2xx but no token could be found.
    pub token: Option<String>,
    pub body: Record,
}

/// Typed calls against the service API. Every call is a JSON `POST`;
/// when the session holds a token it travels as a bearer header.
pub struct ServisClient<T: Transport = UreqTransport> {
    base: String,
    transport: T,
    session: SessionStore,
}

impl ServisClient<UreqTransport> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let session = match &config.token_file {
            Some(path) => SessionStore::persistent(path)?,
            None => SessionStore::in_memory(),
        };
        Ok(Self::new(
            &config.api_base,
            UreqTransport::new(config.timeout()),
            session,
        ))
    }
}

impl<T: Transport> ServisClient<T> {
    pub fn new(base: &str, transport: T, session: SessionStore) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            transport,
            session,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    // ── Auth ────────────────────────────────────────────────────

    /// Authenticate and, when a token is found, start the session.
    pub fn login(&self, payload: &LoginPayload) -> Result<LoginOutcome, ApiError> {
        let context = "Giriş başarısız";
        let response = self.post(endpoints::LOGIN, context, payload)?;
        let (token, body) = extract_token(response.headers(), response.body());
        match &token {
            Some(token) => self.session.set_token(token.as_str())?,
            None => tracing::warn!("login succeeded but no session token was found"),
        }
        Ok(LoginOutcome { token, body })
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        self.session.clear()?;
        Ok(())
    }

    pub fn create_user(&self, payload: &RegisterPayload) -> Result<Record, ApiError> {
        self.post_record(endpoints::CREATE_USER, "Kullanıcı oluşturulamadı", payload)
    }

    // ── Customers ───────────────────────────────────────────────

    pub fn fetch_customers(&self) -> Result<Vec<Record>, ApiError> {
        let context = "Müşteri listesi alınamadı";
        let response = self.post(endpoints::LIST_CUSTOMERS, context, &json!({}))?;
        let records =
            normalize_list(response.body()).map_err(|e| ApiError::from_normalize(context, e))?;
        tracing::debug!(count = records.len(), "customers fetched");
        Ok(records)
    }

    /// Accepts a [`CustomerPayload`](crate::CustomerPayload) or any
    /// JSON-serializable body.
    pub fn create_customer(&self, body: &impl Serialize) -> Result<Record, ApiError> {
        self.post_record(endpoints::CREATE_CUSTOMER, "Müşteri oluşturulamadı", body)
    }

    pub fn delete_customer(&self, id: &str) -> Result<(), ApiError> {
        self.post_record(endpoints::DELETE_CUSTOMER, "Müşteri silme başarısız", &json!({ "id": id }))
            .map(|_| ())
    }

    // ── Products ────────────────────────────────────────────────

    pub fn create_product(&self, body: &impl Serialize) -> Result<Record, ApiError> {
        self.post_record(endpoints::CREATE_PRODUCT, "Cihaz oluşturulamadı", body)
    }

    // ── Plumbing ────────────────────────────────────────────────

    fn post_record(
        &self,
        path: &str,
        context: &str,
        body: &impl Serialize,
    ) -> Result<Record, ApiError> {
        let response = self.post(path, context, body)?;
        normalize_record(response.body()).map_err(|e| ApiError::from_normalize(context, e))
    }

    /// Send one request; non-2xx statuses become [`ApiError::Http`].
    fn post(
        &self,
        path: &str,
        context: &str,
        body: &impl Serialize,
    ) -> Result<Response<String>, ApiError> {
        let bytes = serde_json::to_vec(body)?;
        let url = format!("{}{path}", self.base);
        let token = self.session.token();
        tracing::debug!(%url, authenticated = token.is_some(), "POST");

        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, ACCEPT_ANY);
        if let Some(token) = &token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = builder.body(bytes).map_err(|e| ApiError::Network {
            context: context.to_string(),
            source: TransportError(format!("invalid request for {url}: {e}")),
        })?;

        let response = self.transport.send(request).map_err(|source| {
            tracing::error!(%url, error = %source, "request failed");
            ApiError::Network {
                context: context.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "request rejected");
            return Err(ApiError::http(context, status.as_u16(), response.body()));
        }
        Ok(response)
    }
}
