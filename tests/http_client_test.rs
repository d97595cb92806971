use haru_cognitive::services::{MemoryTokenStore, TokenStore};
use chrono::NaiveDate;
use haru_cognitive::{
    AnswerItem, ApiError, AuthClient, CognitiveApi, DiaryClient, DiaryEntry, HttpCognitiveClient,
};
use pretty_assertions::assert_eq;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// 只应答一次的本地 HTTP 服务，返回收到的原始请求
async fn serve_once(status_line: &'static str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{}", addr), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= pos + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn local_http() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn fetch_questions_sends_query_and_token() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"sessionId": 55, "questions": [{"questionNo": 1, "questionId": 9, "text": "오늘 날짜는?", "category": null}]}"#,
    )
    .await;

    let client = HttpCognitiveClient::with_http_client(local_http(), base_url)
        .with_token(Some("tok-123".to_string()));
    let start = client.fetch_questions(2, 10, None).await.unwrap();

    assert_eq!(start.session_id, 55);
    assert_eq!(start.questions[0].text, "오늘 날짜는?");

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /cognitive/start?user_id=2&count=10 HTTP/1.1"));
    assert!(request.to_lowercase().contains("authorization: bearer tok-123"));
}

#[tokio::test]
async fn fetch_questions_includes_category_when_present() {
    let (base_url, server) =
        serve_once("200 OK", r#"{"sessionId": 1, "questions": []}"#).await;

    let client = HttpCognitiveClient::with_http_client(local_http(), format!("{}/", base_url));
    client.fetch_questions(3, 5, Some("memory")).await.unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /cognitive/start?user_id=3&count=5&category=memory HTTP/1.1"));
    assert!(!request.to_lowercase().contains("authorization:"));
}

#[tokio::test]
async fn fetch_questions_omits_empty_category() {
    let (base_url, server) =
        serve_once("200 OK", r#"{"sessionId": 1, "questions": []}"#).await;

    let client = HttpCognitiveClient::with_http_client(local_http(), base_url);
    client.fetch_questions(2, 10, Some("")).await.unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /cognitive/start?user_id=2&count=10 HTTP/1.1"));
}

#[tokio::test]
async fn submit_answers_posts_json_and_orders_history() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{
            "totalScore": 23.0,
            "categoryAverage": {"memory": 2.5},
            "recentSessions": [
                {"sessionId": 3, "finishedAt": "2025-10-10T10:00:00", "totalScore": 23.0},
                {"sessionId": 1, "finishedAt": "2025-09-10T10:00:00", "totalScore": 20.0}
            ],
            "summary": "좋아요",
            "grade": "정상"
        }"#,
    )
    .await;

    let client = HttpCognitiveClient::with_http_client(local_http(), base_url);
    let answers = vec![AnswerItem {
        question_no: 1,
        question_id: 9,
        stt_text: Some("시월".to_string()),
        typed_text: Some(String::new()),
        latency_ms: Some(3_200),
    }];
    let summary = client.submit_answers(3, &answers).await.unwrap();

    let ids: Vec<i64> = summary.recent_sessions.iter().map(|s| s.session_id).collect();
    assert_eq!(ids, vec![1, 3]);

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /cognitive/submit HTTP/1.1"));

    let body = request.split("\r\n\r\n").nth(1).unwrap();
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "sessionId": 3,
            "answers": [{
                "questionNo": 1,
                "questionId": 9,
                "sttText": "시월",
                "typedText": "",
                "latencyMs": 3200
            }]
        })
    );
}

#[tokio::test]
async fn server_error_is_bad_status() {
    let (base_url, server) = serve_once("500 Internal Server Error", r#"{"detail": "boom"}"#).await;

    let client = HttpCognitiveClient::with_http_client(local_http(), base_url);
    let err = client.submit_answers(1, &[]).await.unwrap_err();

    match err {
        ApiError::BadStatus { status, body, .. } => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn login_stores_token() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"access_token": "jwt-abc", "token_type": "bearer"}"#,
    )
    .await;

    let store = MemoryTokenStore::default();
    let auth = AuthClient::with_http_client(local_http(), base_url);
    let login = auth.login(&store, "haru", "pw1234").await.unwrap();

    assert_eq!(login.token_type, "bearer");
    assert_eq!(store.load().as_deref(), Some("jwt-abc"));

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /auth/login HTTP/1.1"));
    assert!(request.ends_with("username=haru&password=pw1234"));

    auth.logout(&store);
    assert_eq!(store.load(), None);
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn diary_list_groups_entries_by_date() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"[
            {"entry_id": 4, "user_id": 2, "entry_date": "2025-11-06", "mood_code": "우울함", "content": "슬픈 기억.", "created_at": "2025-11-06T22:10:00"},
            {"entry_id": 5, "user_id": 2, "entry_date": "2025-11-03", "mood_code": "보통", "content": "평범한 하루.", "created_at": "2025-11-03T21:00:00"}
        ]"#,
    )
    .await;

    let client = DiaryClient::with_http_client(local_http(), base_url)
        .with_token(Some("tok-9".to_string()));
    let by_date = client.list_by_date(2).await.unwrap();

    let dates: Vec<NaiveDate> = by_date.keys().copied().collect();
    assert_eq!(dates, vec![day("2025-11-03"), day("2025-11-06")]);
    assert_eq!(by_date[&day("2025-11-06")].mood_code, "우울함");

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /diary/list?user_id=2 HTTP/1.1"));
    assert!(request.to_lowercase().contains("authorization: bearer tok-9"));
}

#[tokio::test]
async fn diary_create_posts_entry() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"entry_id": 11, "user_id": 2, "entry_date": "2025-11-09", "mood_code": "행복함", "content": "좋은 날이었다."}"#,
    )
    .await;

    let client = DiaryClient::with_http_client(local_http(), base_url);
    let entry = DiaryEntry {
        entry_date: day("2025-11-09"),
        mood_code: "행복함".to_string(),
        content: "좋은 날이었다.".to_string(),
    };
    let saved = client.create(2, &entry).await.unwrap();

    assert_eq!(saved.entry_id, 11);
    assert_eq!(saved.entry_date, entry.entry_date);

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /diary/create/?user_id=2 HTTP/1.1"));

    let body = request.split("\r\n\r\n").nth(1).unwrap();
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "entry_date": "2025-11-09",
            "mood_code": "행복함",
            "content": "좋은 날이었다."
        })
    );
}

#[tokio::test]
async fn diary_bad_json_is_parse_error() {
    let (base_url, server) = serve_once("200 OK", r#"{"entries": []}"#).await;

    let client = DiaryClient::with_http_client(local_http(), base_url);
    let err = client.list(2).await.unwrap_err();

    assert!(matches!(err, ApiError::JsonParseFailed { .. }));
    assert!(err.to_string().contains("diary/list"));
    server.await.unwrap();
}
