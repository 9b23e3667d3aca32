use crate::config::Config;
use crate::error::ApiError;
use crate::helper::auth_helpers;
use crate::middleware::store_session_user;
use crate::models::SessionUser;
use actix_session::Session;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct LoginForm {
    token: String,
}

pub fn config_auth(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout))
        .route("/is_logged_in", web::get().to(is_logged_in))
        .route("/is_manager", web::get().to(is_manager));
}

async fn login(
    session: Session,
    config: web::Data<Config>,
    form: web::Json<LoginForm>,
) -> Result<HttpResponse, ApiError> {
    let claims = auth_helpers::verify_id_token(&form.token, &config.google_client_id).await?;
    let user = auth_helpers::session_user_from_claims(
        claims,
        &config.allowed_hosted_domain,
        &config.manager_allowlist(),
    )?;

    store_session_user(&session, &user)?;
    log::info!("Login: {} ({})", user.email, if user.is_manager { "manager" } else { "member" });
    Ok(HttpResponse::Ok().json(json!({ "message": "Login successful." })))
}

/// Always succeeds, whether or not a session existed.
async fn logout(session: Session) -> impl Responder {
    session.purge();
    HttpResponse::Ok().json(json!({ "message": "Logged out." }))
}

async fn is_logged_in(user: SessionUser) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(json!({ "message": format!("Logged in as {}.", user.name) })))
}

/// Bare boolean body: 200 `true` for managers, 401 `false` for everyone else.
async fn is_manager(session: Session) -> impl Responder {
    let manager = session.get::<bool>("is_manager").unwrap_or(None).unwrap_or(false)
        && session.get::<bool>("logged_in").unwrap_or(None).unwrap_or(false);
    if manager {
        HttpResponse::Ok().json(true)
    } else {
        HttpResponse::Unauthorized().json(false)
    }
}
