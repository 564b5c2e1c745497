use crate::auth::dto::{Claims, JwtKeys, TokenKind, TokenPair};
use crate::config::JwtConfig;
use crate::error::AppError;
use crate::state::AppState;
use anyhow::Context;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use jsonwebtoken::{decode, encode, Header, Validation};
use std::time::Duration;
use time::OffsetDateTime;
use tracing::{debug, warn};
use uuid::Uuid;

fn minutes(m: i64) -> Duration {
    Duration::from_secs(u64::try_from(m).unwrap_or(0) * 60)
}

impl From<&JwtConfig> for JwtKeys {
    fn from(cfg: &JwtConfig) -> Self {
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: jsonwebtoken::DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            access_ttl: minutes(cfg.ttl_minutes),
            refresh_ttl: minutes(cfg.refresh_ttl_minutes),
        }
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::from(&state.config.jwt)
    }
}

impl JwtKeys {
    fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }

    fn claims_for(&self, user_id: Uuid, kind: TokenKind, now: OffsetDateTime) -> Claims {
        let iat = now.unix_timestamp();
        let exp = iat + self.ttl(kind).as_secs() as i64;
        Claims {
            sub: user_id,
            iat: iat as usize,
            exp: exp as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            kind,
        }
    }

    /// Sign a fresh access/refresh pair for an account.
    pub fn issue(&self, user_id: Uuid) -> anyhow::Result<TokenPair> {
        let now = OffsetDateTime::now_utc();
        let header = Header::default();
        let access = encode(&header, &self.claims_for(user_id, TokenKind::Access, now), &self.encoding)
            .context("sign access token")?;
        let refresh = encode(&header, &self.claims_for(user_id, TokenKind::Refresh, now), &self.encoding)
            .context("sign refresh token")?;
        debug!(user_id = %user_id, "token pair issued");
        Ok(TokenPair { access, refresh })
    }

    /// Decode a token and require it to be of `expected` kind.
    pub fn decode_as(&self, token: &str, expected: TokenKind) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_issuer(&[self.issuer.as_str()]);
        let claims = decode::<Claims>(token, &self.decoding, &validation)?.claims;
        if claims.kind != expected {
            anyhow::bail!("expected {expected:?} token, got {:?}", claims.kind);
        }
        Ok(claims)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// The authenticated account behind a Bearer access token.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".into()))?;
        let claims = JwtKeys::from_ref(state)
            .decode_as(token, TokenKind::Access)
            .map_err(|e| {
                warn!(error = %e, "rejected access token");
                AppError::Unauthorized("Invalid or expired token".into())
            })?;
        Ok(AuthUser(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn keys() -> JwtKeys {
        JwtKeys::from(&crate::config::test_config().jwt)
    }

    #[test]
    fn issued_pair_decodes_by_kind() {
        let keys = keys();
        let user_id = Uuid::new_v4();
        let pair = keys.issue(user_id).unwrap();

        assert_eq!(keys.decode_as(&pair.access, TokenKind::Access).unwrap().sub, user_id);
        assert_eq!(keys.decode_as(&pair.refresh, TokenKind::Refresh).unwrap().sub, user_id);
        assert!(keys.decode_as(&pair.access, TokenKind::Refresh).is_err());
        assert!(keys.decode_as(&pair.refresh, TokenKind::Access).is_err());
    }

    #[test]
    fn refresh_outlives_access() {
        let keys = keys();
        let pair = keys.issue(Uuid::new_v4()).unwrap();
        let access = keys.decode_as(&pair.access, TokenKind::Access).unwrap();
        let refresh = keys.decode_as(&pair.refresh, TokenKind::Refresh).unwrap();
        assert_eq!(access.exp - access.iat, 5 * 60);
        assert_eq!(refresh.exp - refresh.iat, 60 * 60);
    }

    #[test]
    fn token_for_another_deployment_is_rejected() {
        let mut cfg = crate::config::test_config().jwt;
        cfg.audience = "someone-else".into();
        let pair = JwtKeys::from(&cfg).issue(Uuid::new_v4()).unwrap();
        assert!(keys().decode_as(&pair.access, TokenKind::Access).is_err());
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert_eq!(bearer_token(&headers), None);
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
