//! Local canned-response origins for exercising probes without touching
//! real network targets.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Methods seen by an origin, in arrival order.
pub type MethodLog = Arc<Mutex<Vec<String>>>;

async fn read_request_head(stream: &mut TcpStream) -> Vec<u8> {
    let mut head = Vec::new();
    let mut chunk = [0u8; 512];
    loop {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        head.extend_from_slice(&chunk[..n]);
        if head.windows(4).any(|window| window == b"\r\n\r\n") {
            break;
        }
    }
    head
}

/// Origin answering HEAD and GET with fixed status codes, recording the
/// method of every request it sees.
pub async fn spawn_origin(head_status: u16, get_status: u16) -> (String, MethodLog) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: MethodLog = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&log);

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else { break };
            let seen = Arc::clone(&seen);
            tokio::spawn(async move {
                let head = read_request_head(&mut stream).await;
                let request = String::from_utf8_lossy(&head);
                let method = request.split_whitespace().next().unwrap_or_default().to_string();

                let status = if method == "HEAD" { head_status } else { get_status };
                seen.lock().unwrap().push(method);

                let reply = format!(
                    "HTTP/1.1 {status} canned\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
                );
                let _ = stream.write_all(reply.as_bytes()).await;
            });
        }
    });

    (format!("http://{addr}/"), log)
}

/// Origin that accepts connections but never writes a response.
pub async fn spawn_silent_origin() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else { break };
            tokio::spawn(async move {
                // Drain whatever arrives; just never answer.
                let mut sink = [0u8; 512];
                while stream.read(&mut sink).await.map(|n| n > 0).unwrap_or(false) {}
            });
        }
    });

    format!("http://{addr}/")
}

/// Address that refuses connections outright.
pub async fn refused_origin() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}
