//! Canned HTTP responders for exercising the routing client offline.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// A local server answering exactly one request.
pub struct CannedServer {
    /// Base URL to hand to the router, e.g. `http://127.0.0.1:40123`.
    pub base_url: String,
    /// Resolves to the raw request head once the request has been served.
    pub request: JoinHandle<String>,
}

/// Serve one request with `status` (e.g. `"200 OK"`) and a JSON `body`.
pub async fn serve_once(status: &str, body: &str) -> CannedServer {
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let listener = bind().await;
    let base_url = base_url(&listener);
    let request = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept connection");
        let head = read_head(&mut stream).await;
        stream
            .write_all(response.as_bytes())
            .await
            .expect("write canned response");
        head
    });
    CannedServer { base_url, request }
}

/// Accept one request and never answer it within `hold`.
pub async fn serve_silently(hold: Duration) -> CannedServer {
    let listener = bind().await;
    let base_url = base_url(&listener);
    let request = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept connection");
        let head = read_head(&mut stream).await;
        tokio::time::sleep(hold).await;
        head
    });
    CannedServer { base_url, request }
}

/// A base URL on which nothing is listening.
pub async fn closed_base_url() -> String {
    let listener = bind().await;
    base_url(&listener)
}

async fn bind() -> TcpListener {
    TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener")
}

fn base_url(listener: &TcpListener) -> String {
    let addr = listener.local_addr().expect("listener address");
    format!("http://{addr}")
}

async fn read_head(stream: &mut TcpStream) -> String {
    let mut head = Vec::new();
    let mut chunk = [0_u8; 1024];
    while !head.windows(4).any(|window| window == b"\r\n\r\n") {
        let read = stream.read(&mut chunk).await.expect("read request");
        if read == 0 {
            break;
        }
        head.extend_from_slice(&chunk[..read]);
    }
    String::from_utf8_lossy(&head).into_owned()
}

/// GraphHopper body with a two-vertex path of `distance` metres.
pub fn route_body(distance: f64) -> String {
    format!(
        r#"{{"paths":[{{"distance":{distance},"time":60000,"points":{{"type":"LineString","coordinates":[[4.92,45.72],[4.93,45.715],[4.95,45.71]]}}}}]}}"#
    )
}
