/// Session identity
///
/// The login collaborator puts a signed session token in the `quill_session`
/// cookie; this module verifies it and exposes two extractors:
///
/// - [`CurrentUser`]: required identity. Extraction failure becomes a 302 to
///   the login page with the original destination in `next`.
/// - [`Viewer`]: optional identity for pages that render for everyone but
///   personalize for signed-in users (e.g. the profile follow flag).
use crate::error::AppError;
use actix_web::{web, FromRequest, HttpRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use uuid::Uuid;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "quill_session";

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    exp: i64,
}

/// Keys for issuing and verifying session tokens, plus the login location
/// unauthenticated browsers are redirected to.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    pub login_url: String,
}

impl SessionKeys {
    pub fn new(secret: &str, login_url: impl Into<String>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            login_url: login_url.into(),
        }
    }

    /// Issue a session token for `user_id` valid for `ttl`.
    ///
    /// Used by the external login surface and by tests; the service itself
    /// only verifies.
    pub fn issue(
        &self,
        user_id: Uuid,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = SessionClaims {
            sub: user_id.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify a token and return the user it identifies.
    pub fn verify(&self, token: &str) -> Option<Uuid> {
        let data = decode::<SessionClaims>(token, &self.decoding, &Validation::default()).ok()?;
        Uuid::parse_str(&data.claims.sub).ok()
    }
}

fn identity_from(req: &HttpRequest) -> Option<Uuid> {
    let keys = req.app_data::<web::Data<SessionKeys>>()?;
    let cookie = req.cookie(SESSION_COOKIE)?;
    keys.verify(cookie.value())
}

fn login_required(req: &HttpRequest) -> AppError {
    let login_url = req
        .app_data::<web::Data<SessionKeys>>()
        .map(|keys| keys.login_url.clone())
        .unwrap_or_else(|| "/auth/login".to_string());
    let next = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.path().to_string());
    AppError::Unauthenticated { login_url, next }
}

/// Authenticated user id; required by mutation endpoints and the follow feed.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            identity_from(req)
                .map(CurrentUser)
                .ok_or_else(|| login_required(req)),
        )
    }
}

/// Possibly-anonymous viewer; never fails extraction.
#[derive(Debug, Clone, Copy)]
pub struct Viewer(pub Option<Uuid>);

impl FromRequest for Viewer {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(Viewer(identity_from(req))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_and_verify_roundtrip() {
        let keys = SessionKeys::new("test-secret", "/auth/login");
        let user = Uuid::new_v4();
        let token = keys.issue(user, Duration::hours(1)).unwrap();
        assert_eq!(keys.verify(&token), Some(user));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let keys = SessionKeys::new("test-secret", "/auth/login");
        let other = SessionKeys::new("other-secret", "/auth/login");
        let token = keys.issue(Uuid::new_v4(), Duration::hours(1)).unwrap();
        assert_eq!(other.verify(&token), None);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let keys = SessionKeys::new("test-secret", "/auth/login");
        assert_eq!(keys.verify("not-a-token"), None);
    }
}
