use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use error_stack::{Report, ResultExt};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use kernel::prelude::entity::UserEmail;
use kernel::KernelError;

use crate::error::ErrorStatus;
use crate::handler::AppModule;

/// Cookie carrying the access token. Set by `/jwt`, cleared by `/logout`.
pub static ACCESS_COOKIE: &str = "drivexpress_access";

static ACCESS_TOKEN_SECRET: &str = "ACCESS_TOKEN_SECRET";
const TOKEN_TTL: Duration = Duration::days(5);

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

pub struct TokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenAuthority {
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        let secret = env_var(ACCESS_TOKEN_SECRET)?;
        Ok(Self::new(secret.as_bytes()))
    }

    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn issue(&self, email: &str) -> error_stack::Result<String, KernelError> {
        let claims = Claims {
            sub: email.to_string(),
            exp: (OffsetDateTime::now_utc() + TOKEN_TTL).unix_timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(Report::from)
            .change_context(KernelError::Internal)
    }

    /// Expired, malformed and tampered tokens all come back as `Unauthorized`;
    /// the client cannot tell them apart and does not need to.
    pub fn verify(&self, token: &str) -> error_stack::Result<UserEmail, KernelError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(Report::from)
            .change_context(KernelError::Unauthorized)?;
        Ok(UserEmail::new(data.claims.sub))
    }
}

fn env_var(key: &str) -> error_stack::Result<String, KernelError> {
    std::env::var(key)
        .map_err(Report::from)
        .change_context(KernelError::Internal)
        .attach_printable_lazy(|| format!("environment variable {key} is not set"))
}

/// The caller identity taken from the access cookie. Extracting it at all
/// requires a valid token; scoped reads additionally call [`Identity::authorize`]
/// against the path segment before touching the store.
pub struct Identity(UserEmail);

impl Identity {
    pub fn into_email(self) -> UserEmail {
        self.0
    }

    pub fn authorize(&self, email: &str) -> Result<(), ErrorStatus> {
        if self.0.as_ref() == email {
            Ok(())
        } else {
            Err(ErrorStatus::from(Report::new(KernelError::Forbidden)))
        }
    }
}

#[axum::async_trait]
impl FromRequestParts<AppModule> for Identity {
    type Rejection = ErrorStatus;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppModule,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(ACCESS_COOKIE)
            .ok_or_else(|| ErrorStatus::from(Report::new(KernelError::Unauthorized)))?;
        let email = state
            .tokens()
            .verify(token.value())
            .map_err(ErrorStatus::from)?;
        Ok(Self(email))
    }
}
