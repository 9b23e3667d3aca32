use actix_session::SessionExt;
use actix_web::{dev, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::error::ApiError;
use crate::models::SessionUser;

/// Extractor backing every mutating endpoint and the "am I logged in" query.
/// A missing session, a session without `logged_in = true`, or incomplete
/// identity fields all yield 401.
impl FromRequest for SessionUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let session = req.get_session();

        let logged_in = session.get::<bool>("logged_in").unwrap_or(None).unwrap_or(false);
        if !logged_in {
            return ready(Err(ApiError::Unauthorized.into()));
        }

        match (
            session.get::<String>("author_id"),
            session.get::<String>("name"),
            session.get::<String>("email"),
            session.get::<bool>("is_manager"),
        ) {
            (Ok(Some(author_id)), Ok(Some(name)), Ok(Some(email)), Ok(Some(is_manager))) => {
                ready(Ok(SessionUser { author_id, name, email, is_manager }))
            }
            _ => ready(Err(ApiError::Unauthorized.into())),
        }
    }
}

/// Stores a verified identity into the session. Mirrors the fields read by
/// the extractor above.
pub fn store_session_user(session: &actix_session::Session, user: &SessionUser) -> Result<(), ApiError> {
    let store = |r: Result<(), actix_session::SessionInsertError>| {
        r.map_err(|e| ApiError::Storage(format!("session insert failed: {}", e)))
    };
    store(session.insert("author_id", &user.author_id))?;
    store(session.insert("name", &user.name))?;
    store(session.insert("email", &user.email))?;
    store(session.insert("is_manager", user.is_manager))?;
    store(session.insert("logged_in", true))?;
    Ok(())
}
