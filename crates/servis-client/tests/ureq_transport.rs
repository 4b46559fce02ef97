use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use servis_client::*;

/// Serve exactly one canned HTTP response and hand back the raw request.
fn serve_once(response: String) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
            head.push_str(&line);
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).unwrap();
        head.push_str(&String::from_utf8_lossy(&body));

        let mut stream = stream;
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        tx.send(head).unwrap();
    });

    (addr, rx)
}

fn client_for(addr: &str) -> ServisClient<UreqTransport> {
    ServisClient::new(
        addr,
        UreqTransport::new(Duration::from_secs(5)),
        SessionStore::in_memory(),
    )
}

#[test]
fn list_round_trip_over_http() {
    let body = r#"{"isSuccessful":true,"data":[{"id":7,"name":"Ada"}]}"#;
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let (addr, requests) = serve_once(response);

    let client = client_for(&addr);
    client.session().set_token("bearer-token-123").unwrap();
    let records = client.fetch_customers().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "Ada");

    let raw = requests.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(raw.starts_with("POST /api/Customers/GetAll HTTP/1.1"));
    assert!(raw.to_ascii_lowercase().contains("authorization: bearer bearer-token-123"));
    assert!(raw.contains("{}"));
}

#[test]
fn error_status_is_a_response_not_a_transport_error() {
    let (addr, _requests) = serve_once(
        "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
            .to_string(),
    );
    let err = client_for(&addr).delete_customer("x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HttpFailure);
    assert_eq!(err.status(), Some(500));
}

#[test]
fn refused_connection_is_a_network_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client_for(&addr).fetch_customers().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NetworkFailure);
    assert_eq!(err.to_string(), "Ağ hatası: Müşteri listesi alınamadı");
}
