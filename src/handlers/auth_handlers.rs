use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use crate::auth::credentials::AdminCredentials;
use crate::auth::rate_limit::RateLimiter;
use crate::auth::{csrf, session as auth_session};
use crate::errors::{AppError, render};
use crate::templates_structs::LoginTemplate;

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

pub async fn login_page(session: Session) -> Result<HttpResponse, AppError> {
    // Already signed in: straight to the dashboard
    if auth_session::is_admin(&session) {
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/admin"))
            .finish());
    }

    let csrf_token = csrf::get_or_create_token(&session);
    render(LoginTemplate {
        error: None,
        csrf_token,
    })
}

pub async fn login_submit(
    req: HttpRequest,
    session: Session,
    form: web::Form<LoginForm>,
    credentials: web::Data<AdminCredentials>,
    limiter: web::Data<RateLimiter>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    // Rate-limit check before touching the credentials
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or_else(|| std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        let csrf_token = csrf::get_or_create_token(&session);
        return render(LoginTemplate {
            error: Some("Too many failed login attempts. Please try again later.".to_string()),
            csrf_token,
        });
    }

    if credentials.verify(&form.username, &form.password) {
        limiter.clear(ip);
        auth_session::login_admin(&session, &form.username);
        log::info!("Admin '{}' signed in", form.username);
        Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/admin"))
            .finish())
    } else {
        limiter.record_failure(ip);
        let csrf_token = csrf::get_or_create_token(&session);
        render(LoginTemplate {
            error: Some("Invalid username or password".to_string()),
            csrf_token,
        })
    }
}

pub async fn logout(session: Session, form: web::Form<CsrfOnly>) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    auth_session::logout(&session);
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/login"))
        .finish())
}
