use std::time::Duration;

use bonfire_api::{ApiConfig, ApiError, LIST_LIMIT, StoreClient};
use bonfire_core::{NewPurchase, NewReview};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A request as the stub server saw it.
#[derive(Debug)]
struct Seen {
    line: String,
    body: String,
}

/// Serve one canned `(status, body)` response per incoming connection, in
/// order, and hand back what was requested.
async fn stub(responses: Vec<(u16, &'static str)>) -> (StoreClient, JoinHandle<Vec<Seen>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut seen = Vec::new();
        for (status, body) in responses {
            let (mut sock, _) = listener.accept().await.unwrap();
            seen.push(read_request(&mut sock).await);
            let reply = format!(
                "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            sock.write_all(reply.as_bytes()).await.unwrap();
            sock.shutdown().await.ok();
        }
        seen
    });

    let config = ApiConfig {
        base_url: format!("http://{addr}/api"),
        timeout: Duration::from_secs(5),
    };
    (StoreClient::new(&config).unwrap(), handle)
}

async fn read_request(sock: &mut tokio::net::TcpStream) -> Seen {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let n = sock.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client hung up mid-request");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = sock.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Seen {
        line: head.lines().next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
    }
}

#[tokio::test]
async fn list_games_sends_limit_and_normalizes_ids() {
    let (client, server) = stub(vec![(
        200,
        r#"[{"_id": "g1", "title": "Hades", "price": 0}, {"_id": "g2", "title": "Celeste", "price": 19.99}]"#,
    )])
    .await;

    let games = client.list_games(LIST_LIMIT).await.unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(games[0].id, "g1");
    assert_eq!(games[1].price, 19.99);

    let seen = server.await.unwrap();
    assert_eq!(seen[0].line, "GET /api/games?limit=100 HTTP/1.1");
}

#[tokio::test]
async fn nested_recommendation_games_are_normalized() {
    let (client, _server) = stub(vec![(
        200,
        r#"[{"game": {"_id": "g7", "title": "Hollow Knight", "price": 14.99}, "common_tags": 2, "shared_tags": ["Indie", "Metroidvania"]}]"#,
    )])
    .await;

    let recs = client.similar_games_by_tags("g1", 3).await.unwrap();
    assert_eq!(recs[0].game.id, "g7");
    assert_eq!(recs[0].shared_tags, vec!["Indie", "Metroidvania"]);
}

#[tokio::test]
async fn write_posts_json_body() {
    let (client, server) = stub(vec![(
        200,
        r#"{"purchase": {"_id": "p1", "user_id": "u1", "game_id": "g2", "price_paid": 19.99}, "new_balance": 130.01, "message": "Kauf erfolgreich"}"#,
    )])
    .await;

    let receipt = client
        .create_purchase(&NewPurchase {
            user_id: "u1".to_string(),
            game_id: "g2".to_string(),
            price_paid: 19.99,
        })
        .await
        .unwrap();
    assert_eq!(receipt.purchase.id, "p1");
    assert_eq!(receipt.new_balance, 130.01);

    let seen = server.await.unwrap();
    assert_eq!(seen[0].line, "POST /api/purchases/ HTTP/1.1");
    let body: serde_json::Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(body["game_id"], "g2");
    assert_eq!(body["price_paid"], 19.99);
}

#[tokio::test]
async fn error_detail_becomes_message() {
    let (client, _server) = stub(vec![(400, r#"{"detail": "Nicht genug Guthaben"}"#)]).await;

    let err = client
        .create_review(&NewReview {
            user_id: "u1".to_string(),
            game_id: "g1".to_string(),
            rating: 5,
            text: None,
            recommended: true,
            playtime_hours: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Nicht genug Guthaben");
}

#[tokio::test]
async fn error_without_detail_is_generic() {
    let (client, server) = stub(vec![(404, "")]).await;

    let err = client.delete_game("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "HTTP 404");

    let seen = server.await.unwrap();
    assert_eq!(seen[0].line, "DELETE /api/games/missing HTTP/1.1");
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let (client, _server) = stub(vec![(200, r#"{"unexpected": true}"#)]).await;

    let err = client.get_game("g1").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_backend_is_http_error() {
    // Bind then drop to get a port nobody listens on.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let client = StoreClient::new(&ApiConfig {
        base_url: format!("http://{addr}/api"),
        timeout: Duration::from_secs(2),
    })
    .unwrap();

    let err = client.list_publishers().await.unwrap_err();
    assert!(matches!(err, ApiError::Http(_)));
}

#[tokio::test]
async fn seed_reports_counts() {
    let (client, server) = stub(vec![(
        200,
        r#"{"message": "Datenbank erfolgreich befüllt", "counts": {"games": 20, "users": 10}}"#,
    )])
    .await;

    let report = client.seed_database().await.unwrap();
    assert_eq!(report.counts.get("games"), Some(&20));

    let seen = server.await.unwrap();
    assert_eq!(seen[0].line, "POST /api/seed HTTP/1.1");
}

#[tokio::test]
async fn ids_stay_inside_their_path_segment() {
    let (client, server) = stub(vec![
        (200, r#"{"_id": "x", "title": "Odd", "price": 1}"#),
        (200, r#"{"message": "deleted"}"#),
    ])
    .await;

    client.get_game("a/b?limit=1#top").await.unwrap();
    client.delete_user("../games").await.unwrap();

    let seen = server.await.unwrap();
    assert_eq!(seen[0].line, "GET /api/games/a%2Fb%3Flimit=1%23top HTTP/1.1");
    assert_eq!(seen[1].line, "DELETE /api/users/..%2Fgames HTTP/1.1");
}
