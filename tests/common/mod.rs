//! Shared utilities for integration tests.

use std::net::SocketAddr;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

/// Start a minimal HTTP server that answers every request with a fixed body.
pub async fn start_mock_server(addr: SocketAddr, body: &'static str) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Health page of a live gateway server.
pub const LIVE_PAGE: &str = concat!(
    "<html><head><title>Load</title></head>",
    "<body><div id=\"server_status\">OK</div></body></html>"
);

/// Health page of a server that is up but not accepting traffic.
#[allow(dead_code)]
pub const BUSY_PAGE: &str = concat!(
    "<html><head><title>Load</title></head>",
    "<body><div id=\"server_status\">KO</div></body></html>"
);
