//! Remote session client: login, logout, click reports and the user ranking.
//!
//! Every call is a single `fetch` with cookies included. There is no retry,
//! timeout or backoff; a failed call is final and the caller decides what to
//! do with the error.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, RequestMode, Response};

use crate::surface::state::LeaderboardEntry;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("login failed (HTTP {0})")]
    Authentication(u16),
    #[error("logout failed (HTTP {0})")]
    SessionTermination(u16),
    #[error("failed to increment click (HTTP {0})")]
    ClickReport(u16),
    #[error("failed to fetch leaderboard (HTTP {0})")]
    LeaderboardFetch(u16),
    #[error("fetch error: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
}

/// Body of a successful login.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// The user's click tally as known by the backend.
    pub clicked: u64,
}

#[derive(Deserialize)]
struct UsersResponse {
    data: Vec<UserRecord>,
}

#[derive(Deserialize)]
struct UserRecord {
    #[serde(rename = "_id")]
    id: String,
    username: String,
    #[serde(default)]
    clicked: u64,
}

impl From<UserRecord> for LeaderboardEntry {
    fn from(u: UserRecord) -> Self {
        LeaderboardEntry {
            id: u.id,
            display_name: u.username,
            click_count: u.clicked,
        }
    }
}

/// Map a response status to `Ok` or the operation-specific error.
fn check_status(ok: bool, status: u16, on_fail: fn(u16) -> ApiError) -> Result<(), ApiError> {
    if ok {
        Ok(())
    } else {
        Err(on_fail(status))
    }
}

fn parse_login(text: &str) -> Result<LoginResponse, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(format!("login: {e}")))
}

/// Decode `GET /users`. Entries come back in server order; sorting is the
/// surface's job.
fn parse_users(text: &str) -> Result<Vec<LeaderboardEntry>, ApiError> {
    let body: UsersResponse =
        serde_json::from_str(text).map_err(|e| ApiError::Decode(format!("users: {e}")))?;
    Ok(body.data.into_iter().map(LeaderboardEntry::from).collect())
}

fn js_err(e: JsValue) -> ApiError {
    ApiError::Transport(format!("{e:?}"))
}

#[derive(Clone, Debug)]
pub struct SessionClient {
    backend_url: String,
}

impl SessionClient {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.backend_url, path)
    }

    fn headers(&self, bearer: Option<&str>) -> Result<Headers, ApiError> {
        let headers = Headers::new().map_err(js_err)?;
        headers
            .set("Content-Type", "application/json")
            .map_err(js_err)?;
        if let Some(token) = bearer {
            headers
                .set("Authorization", &format!("Bearer {token}"))
                .map_err(js_err)?;
        }
        Ok(headers)
    }

    /// Log in by username. Returns the session token and the remote tally.
    pub async fn authenticate(&self, username: &str) -> Result<LoginResponse, ApiError> {
        let body = serde_json::to_string(&LoginRequest { username })
            .map_err(|e| ApiError::Decode(format!("serialize login: {e}")))?;
        let resp = self
            .send("POST", &self.url("users/login"), Some(&body), None)
            .await?;
        check_status(resp.ok(), resp.status(), ApiError::Authentication)?;
        parse_login(&text(resp).await?)
    }

    /// Invalidate the cookie session on the backend.
    pub async fn deauthenticate(&self) -> Result<(), ApiError> {
        let resp = self
            .send("POST", &self.url("users/logout"), None, None)
            .await?;
        check_status(resp.ok(), resp.status(), ApiError::SessionTermination)
    }

    /// Attribute one click to the session identified by `token`.
    pub async fn report_click(&self, token: &str) -> Result<(), ApiError> {
        let resp = self
            .send("POST", &self.url("users/click"), None, Some(token))
            .await?;
        check_status(resp.ok(), resp.status(), ApiError::ClickReport)
    }

    pub async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let resp = self.send("GET", &self.url("users"), None, None).await?;
        check_status(resp.ok(), resp.status(), ApiError::LeaderboardFetch)?;
        parse_users(&text(resp).await?)
    }

    async fn send(
        &self,
        method: &str,
        url: &str,
        body: Option<&str>,
        bearer: Option<&str>,
    ) -> Result<Response, ApiError> {
        let headers = self.headers(bearer)?;
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_headers(&headers.into());
        opts.set_mode(RequestMode::Cors);
        opts.set_credentials(RequestCredentials::Include);
        if let Some(body) = body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_err)?;
        let window =
            web_sys::window().ok_or_else(|| ApiError::Transport("no global window".into()))?;
        let resp_val = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_err)?;
        resp_val
            .dyn_into::<Response>()
            .map_err(|_| ApiError::Transport("not a Response".into()))
    }
}

async fn text(resp: Response) -> Result<String, ApiError> {
    let value = JsFuture::from(resp.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    value
        .as_string()
        .ok_or_else(|| ApiError::Decode("body is not a string".into()))
}
