//! Client tests against a throwaway local HTTP server.

use std::{
  sync::{Arc, Mutex},
  time::Duration,
};

use cinelog_core::metadata::MetadataSource;
use tokio::{
  io::{AsyncReadExt, AsyncWriteExt},
  net::{TcpListener, TcpStream},
};

use crate::{Error, OmdbClient, OmdbConfig};

const MATCH: &str = r#"{"Title":"Oppenheimer","Year":"2023","Plot":"A physicist.","imdbID":"tt15398776","Response":"True"}"#;
const NO_MATCH: &str = r#"{"Response":"False","Error":"Movie not found!"}"#;

type Seen = Arc<Mutex<Vec<String>>>;

/// Read one request head and return its request line.
async fn read_request_line(sock: &mut TcpStream) -> String {
  let mut buf = vec![0u8; 8192];
  let mut read = 0;
  loop {
    let n = sock.read(&mut buf[read..]).await.unwrap();
    read += n;
    if n == 0 || buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
      break;
    }
  }
  String::from_utf8_lossy(&buf[..read])
    .lines()
    .next()
    .unwrap_or_default()
    .to_owned()
}

/// Answer one connection per canned `(status, body)` pair, in order.
async fn serve(responses: Vec<(u16, &'static str)>) -> (String, Seen) {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  let seen: Seen = Arc::default();
  let seen_srv = seen.clone();

  tokio::spawn(async move {
    for (status, body) in responses {
      let (mut sock, _) = listener.accept().await.unwrap();
      let line = read_request_line(&mut sock).await;
      seen_srv.lock().unwrap().push(line);

      let reply = format!(
        "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\n\
         content-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
      );
      sock.write_all(reply.as_bytes()).await.unwrap();
      sock.shutdown().await.ok();
    }
  });

  (format!("http://{addr}/"), seen)
}

fn client(base_url: String, max_retries: u32) -> OmdbClient {
  let mut config = OmdbConfig::new("k3y");
  config.base_url = base_url;
  config.max_retries = max_retries;
  config.backoff_base = Duration::from_millis(1);
  OmdbClient::new(config).unwrap()
}

#[tokio::test]
async fn match_sends_key_title_and_year() {
  let (url, seen) = serve(vec![(200, MATCH)]).await;
  let m = client(url, 3)
    .lookup("Oppenheimer", Some("2023"))
    .await
    .unwrap()
    .unwrap();

  assert_eq!(m.imdb_id, "tt15398776");
  assert_eq!(m.year, "2023");

  let seen = seen.lock().unwrap();
  assert_eq!(seen.len(), 1);
  assert!(seen[0].starts_with("GET /?"));
  assert!(seen[0].contains("apikey=k3y"));
  assert!(seen[0].contains("t=Oppenheimer"));
  assert!(seen[0].contains("y=2023"));
}

#[tokio::test]
async fn year_is_omitted_when_unknown() {
  let (url, seen) = serve(vec![(200, MATCH)]).await;
  client(url, 0).lookup("Oppenheimer", None).await.unwrap();
  assert!(!seen.lock().unwrap()[0].contains("y="));
}

#[tokio::test]
async fn negative_answer_is_not_retried() {
  let (url, seen) = serve(vec![(200, NO_MATCH), (200, MATCH)]).await;
  let found = client(url, 3).lookup("Nope", None).await.unwrap();
  assert!(found.is_none());
  assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn server_error_is_retried_then_succeeds() {
  let (url, seen) = serve(vec![(503, "{}"), (429, "{}"), (200, MATCH)]).await;
  let found = client(url, 3).lookup("Oppenheimer", None).await.unwrap();
  assert!(found.is_some());
  assert_eq!(seen.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn retries_are_bounded() {
  let (url, seen) = serve(vec![(500, "{}"), (500, "{}"), (500, "{}")]).await;
  let err = client(url, 2)
    .lookup("Oppenheimer", None)
    .await
    .unwrap_err();

  assert!(matches!(err, Error::RetriesExhausted { attempts: 3, .. }));
  assert_eq!(seen.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn client_error_status_is_fatal() {
  let (url, seen) = serve(vec![(401, r#"{"Response":"False","Error":"Invalid API key!"}"#)]).await;
  let err = client(url, 3)
    .lookup("Oppenheimer", None)
    .await
    .unwrap_err();

  assert!(matches!(err, Error::Status(s) if s.as_u16() == 401));
  assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_body_is_fatal() {
  let (url, seen) = serve(vec![(200, "<html>oops</html>"), (200, MATCH)]).await;
  let err = client(url, 3)
    .lookup("Oppenheimer", None)
    .await
    .unwrap_err();

  assert!(matches!(err, Error::Decode(_)));
  assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn unresponsive_server_times_out() {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    let (_sock, _) = listener.accept().await.unwrap();
    tokio::time::sleep(Duration::from_secs(30)).await;
  });

  let mut config = OmdbConfig::new("k3y");
  config.base_url = format!("http://{addr}/");
  config.timeout = Duration::from_millis(100);
  config.max_retries = 0;
  let err = OmdbClient::new(config)
    .unwrap()
    .lookup("Oppenheimer", None)
    .await
    .unwrap_err();

  match err {
    Error::RetriesExhausted { attempts, last } => {
      assert_eq!(attempts, 1);
      assert!(matches!(*last, Error::Transport(ref e) if e.is_timeout()));
    }
    other => panic!("expected a timeout, got {other:?}"),
  }
}

#[test]
fn empty_api_key_fails_fast() {
  assert!(matches!(
    OmdbClient::new(OmdbConfig::new("  ")),
    Err(Error::MissingApiKey)
  ));
}
