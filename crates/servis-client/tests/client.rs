use http::Method;
use serde_json::json;
use servis_client::testing::ScriptedTransport;
use servis_client::*;

const BASE: &str = "https://api.test";

fn client() -> (ServisClient<ScriptedTransport>, ScriptedTransport) {
    let transport = ScriptedTransport::new();
    let client = ServisClient::new(BASE, transport.clone(), SessionStore::in_memory());
    (client, transport)
}

fn login_payload() -> LoginPayload {
    LoginPayload {
        email_or_user_name: "admin".into(),
        password: "secret".into(),
    }
}

// ── Login ───────────────────────────────────────────────────────

#[test]
fn login_stores_header_token() {
    let (client, transport) = client();
    transport.reply_with_header(
        endpoints::LOGIN,
        200,
        ("authorization", "Bearer header.jwt.token"),
        "{}",
    );

    let outcome = client.login(&login_payload()).unwrap();
    assert_eq!(outcome.token.as_deref(), Some("header.jwt.token"));
    assert_eq!(client.session().token().as_deref(), Some("header.jwt.token"));

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::POST);
    assert_eq!(
        calls[0].body,
        json!({ "emailOrUserName": "admin", "password": "secret" })
    );
}

#[test]
fn login_reads_plain_text_token() {
    let (client, transport) = client();
    transport.reply(endpoints::LOGIN, 200, "abc123token");
    let outcome = client.login(&login_payload()).unwrap();
    assert_eq!(outcome.token.as_deref(), Some("abc123token"));
    assert!(outcome.body.is_empty());
    assert!(client.session().is_authenticated());
}

#[test]
fn login_without_token_leaves_session_empty() {
    let (client, transport) = client();
    transport.reply(endpoints::LOGIN, 200, r#"{"isSuccessful":true,"data":{"user":"a"}}"#);
    let outcome = client.login(&login_payload()).unwrap();
    assert_eq!(outcome.token, None);
    assert!(!client.session().is_authenticated());
}

#[test]
fn failed_login_is_an_http_failure() {
    let (client, transport) = client();
    transport.reply(endpoints::LOGIN, 401, "");
    let err = client.login(&login_payload()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HttpFailure);
    assert_eq!(err.to_string(), "Giriş başarısız (HTTP 401)");
    assert!(!client.session().is_authenticated());
}

#[test]
fn logout_clears_the_session() {
    let (client, _) = client();
    client.session().set_token("some-long-token").unwrap();
    client.logout().unwrap();
    assert!(!client.session().is_authenticated());
}

// ── Customers ───────────────────────────────────────────────────

#[test]
fn requests_carry_the_bearer_token() {
    let (client, transport) = client();
    transport.reply(endpoints::LIST_CUSTOMERS, 200, "[]");

    client.fetch_customers().unwrap();
    client.session().set_token("tok-1234567890").unwrap();
    client.fetch_customers().unwrap();

    let calls = transport.calls_to(endpoints::LIST_CUSTOMERS);
    assert_eq!(calls[0].bearer(), None);
    assert_eq!(calls[1].bearer(), Some("tok-1234567890"));
    assert_eq!(calls[1].body, json!({}));
    assert_eq!(
        calls[1].headers["accept"].to_str().unwrap(),
        "application/json, text/plain, */*"
    );
    assert_eq!(
        calls[1].headers["content-type"].to_str().unwrap(),
        "application/json"
    );
}

#[test]
fn fetch_unwraps_success_envelope() {
    let (client, transport) = client();
    transport.reply(
        endpoints::LIST_CUSTOMERS,
        200,
        json!({ "isSuccessful": true, "data": [{ "id": 1 }, { "id": 2 }] }).to_string(),
    );
    let records = client.fetch_customers().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["id"], 2);
}

#[test]
fn fetch_reports_logical_failure() {
    let (client, transport) = client();
    transport.reply(
        endpoints::LIST_CUSTOMERS,
        200,
        json!({ "isSuccessful": false, "errorMessages": ["Yetkisiz"] }).to_string(),
    );
    let err = client.fetch_customers().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LogicalFailure);
    assert_eq!(err.to_string(), "Müşteri listesi alınamadı: Yetkisiz");
}

#[test]
fn fetch_rejects_non_json_list() {
    let (client, transport) = client();
    transport.reply(endpoints::LIST_CUSTOMERS, 200, "<html>maintenance</html>");
    let err = client.fetch_customers().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedPayload);
}

#[test]
fn create_customer_returns_unwrapped_record() {
    let (client, transport) = client();
    transport.reply(
        endpoints::CREATE_CUSTOMER,
        200,
        json!({ "isSuccessful": true, "data": { "id": "c-1", "name": "İlayda" } }).to_string(),
    );
    let record = client.create_customer(&json!({ "name": "İlayda" })).unwrap();
    assert_eq!(record["id"], "c-1");
    assert_eq!(
        transport.calls_to(endpoints::CREATE_CUSTOMER)[0].body,
        json!({ "name": "İlayda" })
    );
}

#[test]
fn create_customer_surfaces_validation_details() {
    let (client, transport) = client();
    transport.reply(
        endpoints::CREATE_CUSTOMER,
        400,
        json!({
            "title": "One or more validation errors occurred.",
            "errors": { "PhoneNumber": ["invalid"] },
        })
        .to_string(),
    );
    let err = client.create_customer(&json!({})).unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "One or more validation errors occurred.");
    assert_eq!(err.details(), ["PhoneNumber: invalid"]);
}

#[test]
fn delete_sends_the_id() {
    let (client, transport) = client();
    transport.reply(endpoints::DELETE_CUSTOMER, 200, "");
    client.delete_customer("c-42").unwrap();
    assert_eq!(
        transport.calls_to(endpoints::DELETE_CUSTOMER)[0].body,
        json!({ "id": "c-42" })
    );
}

#[test]
fn delete_not_found() {
    let (client, transport) = client();
    transport.reply(endpoints::DELETE_CUSTOMER, 404, "");
    let err = client.delete_customer("missing").unwrap_err();
    assert_eq!(err.to_string(), "Müşteri silme başarısız (HTTP 404)");
}

// ── Products and users ─────────────────────────────────────────

#[test]
fn network_failure_names_the_action() {
    let (client, transport) = client();
    transport.fail(endpoints::CREATE_PRODUCT, "connection refused");
    let err = client.create_product(&json!({ "brand": "Apple" })).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NetworkFailure);
    assert_eq!(err.to_string(), "Ağ hatası: Cihaz oluşturulamadı");
}

#[test]
fn create_user_posts_registration() {
    let (client, transport) = client();
    transport.reply(endpoints::CREATE_USER, 200, r#"{"id":"u-1"}"#);
    let record = client
        .create_user(&RegisterPayload {
            name: "Ada".into(),
            surname: "Lovelace".into(),
            user_name: "ada".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
        })
        .unwrap();
    assert_eq!(record["id"], "u-1");
    assert_eq!(
        transport.calls_to(endpoints::CREATE_USER)[0].body["userName"],
        "ada"
    );
}

#[test]
fn unscripted_paths_answer_not_found() {
    let (client, _) = client();
    let err = client.create_product(&json!({})).unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[test]
fn queued_replies_then_repeat() {
    let (client, transport) = client();
    transport
        .reply(endpoints::LIST_CUSTOMERS, 200, "[]")
        .reply(endpoints::LIST_CUSTOMERS, 200, r#"[{"id":1}]"#);
    assert!(client.fetch_customers().unwrap().is_empty());
    assert_eq!(client.fetch_customers().unwrap().len(), 1);
    assert_eq!(client.fetch_customers().unwrap().len(), 1);
}
