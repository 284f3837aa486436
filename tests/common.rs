#![allow(dead_code)]

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub const TOKEN: &str = "glpat-secret";

pub const EXAMPLE_BODY: &str = r#"[{"old_path":"a.py","new_path":"a.py","diff":"-old\n+new\n unchanged"}]"#;

/// A one-shot HTTP responder standing in for GitLab.
///
/// Accepts a single connection, records the request head and answers with the
/// canned status and body. Never answers when `status` is `None`.
pub struct CannedServer {
  pub url: String,
  handle:  JoinHandle<Option<String>>
}

impl CannedServer {
  pub async fn start(status: &'static str, body: &'static str) -> Self {
    Self::spawn(Some(status), body).await
  }

  pub async fn silent() -> Self {
    Self::spawn(None, "").await
  }

  async fn spawn(status: Option<&'static str>, body: &'static str) -> Self {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
      let (mut socket, _) = listener.accept().await.ok()?;
      let head = read_head(&mut socket).await?;

      match status {
        Some(status) => {
          let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
          );
          socket.write_all(response.as_bytes()).await.ok()?;
          socket.shutdown().await.ok()?;
        }
        None => tokio::time::sleep(Duration::from_secs(30)).await
      }

      Some(head)
    });

    Self { url, handle }
  }

  /// The request head, or `None` if no request arrived within `wait`.
  pub async fn request(self, wait: Duration) -> Option<String> {
    match tokio::time::timeout(wait, self.handle).await {
      Ok(Ok(head)) => head,
      _ => None
    }
  }
}

async fn read_head(socket: &mut TcpStream) -> Option<String> {
  let mut head = Vec::new();
  let mut buf = [0u8; 1024];

  while !head.windows(4).any(|w| w == b"\r\n\r\n") {
    let n = socket.read(&mut buf).await.ok()?;
    if n == 0 {
      return None;
    }
    head.extend_from_slice(&buf[..n]);
  }

  String::from_utf8(head).ok()
}

/// An address nothing listens on.
pub async fn closed_url() -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let url = format!("http://{}", listener.local_addr().unwrap());
  drop(listener);
  url
}
