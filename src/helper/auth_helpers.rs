use crate::error::ApiError;
use crate::models::SessionUser;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::collections::HashSet;

const GOOGLE_CERTS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";
const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Claims we keep from a verified Google ID token. Audience, issuer and
/// expiry are enforced by `jsonwebtoken::Validation` before these are
/// deserialized.
#[derive(Debug, Deserialize)]
pub struct GoogleClaims {
    pub sub: String,
    pub email: String,
    pub name: Option<String>,
    /// Hosted-domain claim; absent for plain gmail accounts.
    pub hd: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

/// Verifies signature, audience, issuer and expiry of a Google-issued ID
/// token against Google's published JWKS. Every verification failure
/// collapses into `InvalidToken`; the domain check happens separately in
/// [`session_user_from_claims`].
pub async fn verify_id_token(token: &str, client_id: &str) -> Result<GoogleClaims, ApiError> {
    let header = decode_header(token).map_err(|e| ApiError::InvalidToken(e.to_string()))?;
    let kid = header
        .kid
        .ok_or_else(|| ApiError::InvalidToken("token header has no key id".to_string()))?;

    let jwks: JwkSet = reqwest::get(GOOGLE_CERTS_URL)
        .await
        .map_err(|e| ApiError::InvalidToken(format!("could not fetch Google keys: {}", e)))?
        .json()
        .await
        .map_err(|e| ApiError::InvalidToken(format!("could not parse Google keys: {}", e)))?;

    let jwk = jwks
        .keys
        .iter()
        .find(|k| k.kid == kid)
        .ok_or_else(|| ApiError::InvalidToken("no matching Google key for token".to_string()))?;

    let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
        .map_err(|e| ApiError::InvalidToken(e.to_string()))?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[client_id]);
    validation.set_issuer(&GOOGLE_ISSUERS);

    let data = decode::<GoogleClaims>(token, &key, &validation)
        .map_err(|e| ApiError::InvalidToken(e.to_string()))?;
    Ok(data.claims)
}

/// Turns verified claims into the session identity. The hosted-domain claim
/// must equal the configured domain; the manager flag comes from allowlist
/// membership of the email.
pub fn session_user_from_claims(
    claims: GoogleClaims,
    allowed_domain: &str,
    manager_allowlist: &HashSet<String>,
) -> Result<SessionUser, ApiError> {
    if claims.hd.as_deref() != Some(allowed_domain) {
        return Err(ApiError::DomainNotAllowed);
    }

    let is_manager = manager_allowlist.contains(&claims.email);
    Ok(SessionUser {
        author_id: claims.sub,
        name: claims.name.unwrap_or_else(|| claims.email.clone()),
        email: claims.email,
        is_manager,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(hd: Option<&str>, email: &str) -> GoogleClaims {
        GoogleClaims {
            sub: "subject-123".to_string(),
            email: email.to_string(),
            name: Some("Test User".to_string()),
            hd: hd.map(|s| s.to_string()),
        }
    }

    fn allowlist(emails: &[&str]) -> HashSet<String> {
        emails.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn mismatched_hosted_domain_is_rejected() {
        let result = session_user_from_claims(
            claims(Some("other.edu"), "user@other.edu"),
            "example.edu",
            &allowlist(&[]),
        );
        assert!(matches!(result, Err(ApiError::DomainNotAllowed)));
    }

    #[test]
    fn missing_hosted_domain_is_rejected() {
        let result = session_user_from_claims(
            claims(None, "user@gmail.com"),
            "example.edu",
            &allowlist(&[]),
        );
        assert!(matches!(result, Err(ApiError::DomainNotAllowed)));
    }

    #[test]
    fn allowlisted_email_becomes_a_manager() {
        let user = session_user_from_claims(
            claims(Some("example.edu"), "boss@example.edu"),
            "example.edu",
            &allowlist(&["boss@example.edu", "other@example.edu"]),
        )
        .unwrap();
        assert!(user.is_manager);
        assert_eq!(user.author_id, "subject-123");
    }

    #[test]
    fn everyone_else_is_not_a_manager() {
        let user = session_user_from_claims(
            claims(Some("example.edu"), "student@example.edu"),
            "example.edu",
            &allowlist(&["boss@example.edu"]),
        )
        .unwrap();
        assert!(!user.is_manager);
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let mut c = claims(Some("example.edu"), "student@example.edu");
        c.name = None;
        let user = session_user_from_claims(c, "example.edu", &allowlist(&[])).unwrap();
        assert_eq!(user.name, "student@example.edu");
    }
}
