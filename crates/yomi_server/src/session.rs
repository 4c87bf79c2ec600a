//! Contains the `CurrentSession` extractor and the cookie and cache helpers behind it.

use crate::YomiState;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    RequestPartsExt,
};
use moka::{future::Cache, Expiry};
use serde::{Deserialize, Serialize};
use std::{
    borrow::Cow,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;
use tower_cookies::{cookie::SameSite, Cookie, Cookies, SignedCookies};
use yomi::QuizSession;

pub type SharedSession = Arc<Mutex<QuizSession>>;
pub type SessionCache = Cache<u64, SharedSession>;

/// Basic cache expiration policy that refreshes after reads and writes.
pub struct Expiration {
    pub days: Duration,
}

impl Expiration {
    /// Fails if `days` is 0.
    pub fn new(days: u32) -> eyre::Result<Self> {
        if days == 0 {
            eyre::bail!("Sessions must last at least a day");
        }
        let days = chrono::Duration::try_days(days.into())
            .ok_or_else(|| eyre::eyre!("Session expiration of {days} days is out of range"))?
            .to_std()?;
        Ok(Self { days })
    }
}

impl<K, V> Expiry<K, V> for Expiration {
    fn expire_after_create(&self, _key: &K, _value: &V, _current_time: Instant) -> Option<Duration> {
        Some(self.days)
    }

    fn expire_after_read(
        &self,
        _key: &K,
        _value: &V,
        _current_time: Instant,
        _current_duration: Option<Duration>,
        _last_modified_at: Instant,
    ) -> Option<Duration> {
        Some(self.days)
    }

    fn expire_after_update(
        &self,
        _key: &K,
        _value: &V,
        _current_time: Instant,
        _current_duration: Option<Duration>,
    ) -> Option<Duration> {
        Some(self.days)
    }
}

/// The cookie that is stored signed on the user's browser to find their quiz session.
#[derive(Deserialize, Serialize)]
struct SessionCookie {
    /// Session's id in the cache
    session_id: u64,
}

impl SessionCookie {
    /// The name of the cookie in the browser.
    const NAME: &'static str = yomi_api::SESSION_COOKIE_NAME;

    fn new() -> Self {
        Self {
            session_id: rand::random(),
        }
    }

    /// Tries to extract the cookie from signed cookies.
    /// Removes cookies that exist but fail to parse.
    fn from_signed_cookies(signed_cookies: &SignedCookies<'_>) -> Option<Self> {
        let cookie = signed_cookies.get(SessionCookie::NAME)?;
        match serde_json::from_str::<SessionCookie>(cookie.value()) {
            Ok(session_cookie) => Some(session_cookie),
            Err(err) => {
                tracing::warn!("Removing malformed session cookie: {err}");
                remove_session_cookie(signed_cookies);
                None
            }
        }
    }
}

/// Extractor for the caller's quiz session. Starts a new session if the caller has none.
pub struct CurrentSession {
    pub session_id: u64,
    pub session: SharedSession,
}

impl Debug for CurrentSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.session_id)
    }
}

impl FromRequestParts<YomiState> for CurrentSession {
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &YomiState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = parts.extract::<Cookies>().await?;
        let signed_cookies = cookies.signed(&state.private_cookie_key);
        if let Some(session_cookie) = SessionCookie::from_signed_cookies(&signed_cookies) {
            if let Some(session) = state.sessions.get(&session_cookie.session_id).await {
                return Ok(CurrentSession {
                    session_id: session_cookie.session_id,
                    session,
                });
            }
            // has cookie but the session expired or was forgotten
            tracing::debug!("No session for id {}", session_cookie.session_id);
        }
        start_session(state, &signed_cookies)
            .await
            .map_err(|err| {
                tracing::error!("{err:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to start session")
            })
    }
}

fn build_cookie(value: impl Into<Cow<'static, str>>) -> Cookie<'static> {
    Cookie::build((SessionCookie::NAME, value))
        .path("/")
        .secure(false)
        .http_only(true)
        .same_site(SameSite::Strict)
        .build()
}

/// Starts a new quiz session and saves it to both the cookies and server cache.
pub async fn start_session(
    state: &YomiState,
    signed_cookies: &SignedCookies<'_>,
) -> eyre::Result<CurrentSession> {
    let session_cookie = SessionCookie::new();
    let cookie_value = serde_json::to_string(&session_cookie)?;
    signed_cookies.add(build_cookie(cookie_value));

    let session = state.quiz.start_session(&mut rand::rng());
    tracing::info!(
        "Started session {} with prompt {}",
        session_cookie.session_id,
        session.prompt().character()
    );
    let session = Arc::new(Mutex::new(session));
    state
        .sessions
        .insert(session_cookie.session_id, session.clone())
        .await;
    Ok(CurrentSession {
        session_id: session_cookie.session_id,
        session,
    })
}

fn remove_session_cookie(signed_cookies: &SignedCookies<'_>) {
    let cookie = build_cookie("");
    signed_cookies.remove(cookie);
}

/// Forgets the caller's session, if they have one.
pub async fn forget_session(signed_cookies: &SignedCookies<'_>, sessions: &SessionCache) {
    if let Some(session_cookie) = SessionCookie::from_signed_cookies(signed_cookies) {
        sessions.remove(&session_cookie.session_id).await;
        tracing::info!("Forgot session {}", session_cookie.session_id);
    }
    remove_session_cookie(signed_cookies);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn expiration_is_in_days() {
        let expiration = Expiration::new(4).unwrap();
        assert_eq!(expiration.days, Duration::from_secs(4 * 24 * 60 * 60));
        assert!(Expiration::new(0).is_err());
    }

    #[test]
    fn cookie_value_is_json() {
        let cookie = SessionCookie { session_id: 42 };
        let value = serde_json::to_string(&cookie).unwrap();
        assert_eq!(value, r#"{"session_id":42}"#);
        let cookie = build_cookie(value);
        assert_eq!(cookie.name(), "yomi_session");
        assert_eq!(cookie.http_only(), Some(true));
    }
}
