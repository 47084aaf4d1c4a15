use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use crate::auth::ACCESS_COOKIE;
use crate::error::ErrorStatus;
use crate::handler::AppModule;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    email: String,
}

// Cross-site frontends need SameSite=None, which browsers only accept on
// secure cookies. Local development keeps Lax over plain http.
fn secure() -> bool {
    std::env::var("APP_ENV").map(|v| v == "production").unwrap_or(false)
}

pub trait SessionRouter {
    fn route_session(self) -> Self;
}

impl SessionRouter for Router<AppModule> {
    fn route_session(self) -> Self {
        self.route(
            "/jwt",
            post(
                |State(module): State<AppModule>,
                 jar: CookieJar,
                 Json(req): Json<TokenRequest>| async move {
                    let token = module
                        .tokens()
                        .issue(&req.email)
                        .map_err(ErrorStatus::from)?;
                    let secure = secure();
                    let cookie = Cookie::build((ACCESS_COOKIE, token))
                        .path("/")
                        .http_only(true)
                        .secure(secure)
                        .same_site(if secure { SameSite::None } else { SameSite::Lax })
                        .build();
                    Ok::<_, ErrorStatus>((
                        jar.add(cookie),
                        Json(serde_json::json!({ "success": true })),
                    ))
                },
            ),
        )
        .route(
            "/logout",
            get(|jar: CookieJar| async move {
                let cookie = Cookie::build(ACCESS_COOKIE).path("/").build();
                (
                    jar.remove(cookie),
                    Json(serde_json::json!({ "success": true })),
                )
            }),
        )
    }
}
