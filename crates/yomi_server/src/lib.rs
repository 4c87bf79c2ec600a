//! Web backend for yomi.

pub mod config;
pub mod error;
pub mod handlers;
pub mod session;

use axum::{
    routing::{get, post},
    Router,
};
use config::Config;
use handlers::{kanji, session as quiz_session};
use moka::future::Cache;
use session::{Expiration, SessionCache};
use std::{fmt::Debug, ops::Deref, sync::Arc};
use tower_cookies::{CookieManagerLayer, Key};
use tower_http::trace::TraceLayer;
use yomi::Quiz;

#[derive(Clone)]
pub struct YomiState(Arc<YomiStateCore>);

impl Deref for YomiState {
    type Target = YomiStateCore;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Debug for YomiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Yomi")
    }
}

pub struct YomiStateCore {
    pub quiz: Quiz,
    pub private_cookie_key: Key,
    pub sessions: SessionCache,
    /// Upper bound for the number of attempts returned from the history.
    pub history_limit: usize,
}

impl YomiState {
    pub fn new(
        quiz: Quiz,
        private_cookie_key: Key,
        expiration: Expiration,
        history_limit: usize,
    ) -> Self {
        let sessions = Cache::builder()
            .max_capacity(100_000)
            .expire_after(expiration)
            .build();
        Self(Arc::new(YomiStateCore {
            quiz,
            private_cookie_key,
            sessions,
            history_limit,
        }))
    }
}

pub fn router(state: YomiState) -> Router<()> {
    Router::new()
        .nest(
            "/api",
            Router::new()
                .route("/kanji", get(kanji::list))
                .route("/kanji/{kanji}/reading", get(kanji::reading))
                .route(
                    "/session",
                    get(quiz_session::current).delete(quiz_session::end),
                )
                .route("/session/next", post(quiz_session::next))
                .route("/session/transcript", post(quiz_session::transcript))
                .route("/session/check", post(quiz_session::check))
                .route("/session/reading", get(quiz_session::reading))
                .route("/session/history", get(quiz_session::history))
                .layer(CookieManagerLayer::new()),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn router_from_config(config: &Config) -> eyre::Result<Router<()>> {
    let quiz = config.quiz()?;
    tracing::info!("Loaded {} kanji", quiz.table().len());
    let private_cookie_key = config.private_cookie_key()?;
    let expiration = Expiration::new(config.session_expiration_days)?;
    let state = YomiState::new(quiz, private_cookie_key, expiration, config.history_limit);
    Ok(self::router(state))
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use yomi::{EmptyAttempts, KanjiTable, NormalizeOptions};

    fn app(history_limit: usize) -> Router<()> {
        let quiz = Quiz::new(
            KanjiTable::builtin().unwrap(),
            NormalizeOptions::default(),
            EmptyAttempts::Skip,
        );
        let key = Key::from(&[7u8; 64]);
        let state = YomiState::new(quiz, key, Expiration::new(1).unwrap(), history_limit);
        router(state)
    }

    struct Reply {
        status: StatusCode,
        set_cookie: Option<String>,
        body: Value,
    }

    async fn send(
        app: &Router<()>,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> Reply {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .map(|value| value.to_str().unwrap().split(';').next().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        Reply {
            status,
            set_cookie,
            body,
        }
    }

    /// Starts a session and returns its cookie and prompt.
    async fn start(app: &Router<()>) -> (String, char) {
        let reply = send(app, Method::GET, "/api/session", None, None).await;
        assert_eq!(reply.status, StatusCode::OK);
        let cookie = reply.set_cookie.unwrap();
        let kanji = reply.body["kanji"].as_str().unwrap().chars().next().unwrap();
        (cookie, kanji)
    }

    fn readings_of(kanji: char) -> Vec<String> {
        KanjiTable::builtin()
            .unwrap()
            .get(kanji)
            .unwrap()
            .readings()
            .to_vec()
    }

    #[tokio::test]
    async fn starts_and_keeps_session() {
        let app = app(30);
        let (cookie, kanji) = start(&app).await;
        assert!(cookie.starts_with("yomi_session="));

        let reply = send(&app, Method::GET, "/api/session", Some(&cookie), None).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert!(reply.set_cookie.is_none());
        assert_eq!(reply.body["kanji"], json!(kanji.to_string()));
        assert_eq!(reply.body["phase"], json!({ "phase": "awaiting_input" }));
        assert_eq!(reply.body["last_transcript"], Value::Null);
        assert_eq!(reply.body["romaji_available"], json!(true));
    }

    #[tokio::test]
    async fn checks_typed_answers() {
        let app = app(30);
        let (cookie, kanji) = start(&app).await;
        let readings = readings_of(kanji);

        // katakana is folded before matching
        let katakana = to_katakana(&readings[0]);
        let reply = send(
            &app,
            Method::POST,
            "/api/session/check",
            Some(&cookie),
            Some(json!({ "answer": katakana })),
        )
        .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["outcome"], json!("correct"));
        assert_eq!(reply.body["normalized"], json!(readings[0]));
        assert_eq!(reply.body["accepted_readings"], json!(readings));

        let reply = send(
            &app,
            Method::POST,
            "/api/session/check",
            Some(&cookie),
            Some(json!({ "answer": "ぬぬぬ" })),
        )
        .await;
        assert_eq!(reply.body["outcome"], json!("incorrect"));

        let reply = send(&app, Method::GET, "/api/session", Some(&cookie), None).await;
        assert_eq!(
            reply.body["phase"],
            json!({ "phase": "checked", "outcome": "incorrect" })
        );
    }

    fn to_katakana(hiragana: &str) -> String {
        hiragana
            .chars()
            .map(|c| char::from_u32(c as u32 + 0x60).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn prompt_kanji_reads_as_itself() {
        let app = app(30);
        let (cookie, kanji) = start(&app).await;
        let reply = send(
            &app,
            Method::POST,
            "/api/session/check",
            Some(&cookie),
            Some(json!({ "answer": format!("{kanji}です") })),
        )
        .await;
        assert_eq!(reply.body["outcome"], json!("correct"));
        assert_eq!(reply.body["normalized"], json!(readings_of(kanji)[0]));
    }

    #[tokio::test]
    async fn empty_answers_are_not_recorded() {
        let app = app(30);
        let (cookie, _) = start(&app).await;
        let reply = send(
            &app,
            Method::POST,
            "/api/session/check",
            Some(&cookie),
            Some(json!({})),
        )
        .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["outcome"], json!("empty"));
        assert_eq!(reply.body["normalized"], json!(""));

        let reply = send(&app, Method::GET, "/api/session/history", Some(&cookie), None).await;
        assert_eq!(reply.body, json!([]));
    }

    #[tokio::test]
    async fn transcript_takes_priority() {
        let app = app(30);
        let (cookie, kanji) = start(&app).await;
        let reading = readings_of(kanji)[0].clone();

        let reply = send(
            &app,
            Method::POST,
            "/api/session/transcript",
            Some(&cookie),
            Some(json!({ "text": format!(" {reading} ") })),
        )
        .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["last_transcript"], json!(reading));

        let reply = send(
            &app,
            Method::POST,
            "/api/session/check",
            Some(&cookie),
            Some(json!({ "answer": "ぬぬぬ" })),
        )
        .await;
        assert_eq!(reply.body["outcome"], json!("correct"));
    }

    #[tokio::test]
    async fn next_resets_prompt_state() {
        let app = app(30);
        let (cookie, _) = start(&app).await;
        send(
            &app,
            Method::POST,
            "/api/session/transcript",
            Some(&cookie),
            Some(json!({ "text": "やま" })),
        )
        .await;
        send(
            &app,
            Method::POST,
            "/api/session/check",
            Some(&cookie),
            Some(json!({})),
        )
        .await;

        let reply = send(&app, Method::POST, "/api/session/next", Some(&cookie), None).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["phase"], json!({ "phase": "awaiting_input" }));
        assert_eq!(reply.body["last_transcript"], Value::Null);
        let kanji = reply.body["kanji"].as_str().unwrap().chars().next().unwrap();

        let reply = send(&app, Method::GET, "/api/session/reading", Some(&cookie), None).await;
        assert_eq!(reply.body["kanji"], json!(kanji.to_string()));
        assert_eq!(reply.body["reading"], json!(readings_of(kanji)[0]));
    }

    #[tokio::test]
    async fn history_is_newest_first_and_limited() {
        let app = app(2);
        let (cookie, kanji) = start(&app).await;
        let reading = readings_of(kanji)[0].clone();
        for answer in ["ぬ", "ね", reading.as_str()] {
            send(
                &app,
                Method::POST,
                "/api/session/check",
                Some(&cookie),
                Some(json!({ "answer": answer })),
            )
            .await;
        }

        let reply = send(&app, Method::GET, "/api/session/history", Some(&cookie), None).await;
        assert_eq!(
            reply.body,
            json!([
                { "kanji": kanji.to_string(), "answer": reading, "outcome": "correct" },
                { "kanji": kanji.to_string(), "answer": "ね", "outcome": "incorrect" },
            ])
        );

        let reply = send(
            &app,
            Method::GET,
            "/api/session/history?limit=1",
            Some(&cookie),
            None,
        )
        .await;
        assert_eq!(reply.body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn ending_session_forgets_it() {
        let app = app(30);
        let (cookie, _) = start(&app).await;
        let reply = send(&app, Method::DELETE, "/api/session", Some(&cookie), None).await;
        assert_eq!(reply.status, StatusCode::NO_CONTENT);

        let reply = send(&app, Method::GET, "/api/session", Some(&cookie), None).await;
        assert_eq!(reply.status, StatusCode::OK);
        let new_cookie = reply.set_cookie.unwrap();
        assert_ne!(new_cookie, cookie);
    }

    #[tokio::test]
    async fn tampered_cookie_starts_new_session() {
        let app = app(30);
        let reply = send(
            &app,
            Method::GET,
            "/api/session",
            Some(r#"yomi_session={"session_id":1}"#),
            None,
        )
        .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert!(reply.set_cookie.is_some());
    }

    #[tokio::test]
    async fn lists_kanji() {
        let app = app(30);
        let reply = send(&app, Method::GET, "/api/kanji", None, None).await;
        assert_eq!(reply.status, StatusCode::OK);
        let kanji = reply.body["kanji"].as_array().unwrap();
        assert_eq!(kanji.len(), 30);
        assert!(kanji.contains(&json!("川")));
    }

    #[tokio::test]
    async fn looks_up_readings() {
        let app = app(30);
        let reply = send(&app, Method::GET, "/api/kanji/%E5%B7%9D/reading", None, None).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, json!({ "kanji": "川", "reading": "かわ" }));

        // 猫 is not in the table
        let reply = send(&app, Method::GET, "/api/kanji/%E7%8C%AB/reading", None, None).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert!(reply.body["message"].as_str().unwrap().contains('猫'));

        let reply = send(&app, Method::GET, "/api/kanji/abc/reading", None, None).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    }
}
