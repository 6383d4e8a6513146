use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use reqwest::blocking::Client;

use super::ServiceAccountKey;

pub const TEST_PRIVATE_KEY: &str = include_str!("testdata/service_account_key.pem");

pub fn test_key() -> ServiceAccountKey {
    ServiceAccountKey {
        client_email: "etl@example.iam.gserviceaccount.com".to_string(),
        private_key: TEST_PRIVATE_KEY.to_string(),
        private_key_id: None,
        token_uri: "https://oauth2.googleapis.com/token".to_string(),
    }
}

/// Client that talks to local listeners directly, whatever the proxy env says.
pub fn local_client() -> Client {
    Client::builder().no_proxy().build().expect("build local client")
}

/// Answers exactly one HTTP request with `status` and `body`; the handle
/// yields the raw request that was received.
pub fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let url = format!("http://{}/", listener.local_addr().expect("local addr"));
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

        let mut request = String::new();
        let mut content_length = 0;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read request line");
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().expect("content length");
                }
            }
            request.push_str(&line);
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }

        let mut body = vec![0_u8; content_length];
        reader.read_exact(&mut body).expect("read request body");
        request.push_str(&String::from_utf8_lossy(&body));

        stream
            .write_all(response.as_bytes())
            .expect("write response");
        stream.flush().expect("flush response");
        request
    });

    (url, handle)
}
