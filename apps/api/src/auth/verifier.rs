//! Bearer-token verification against the external identity provider.
//!
//! The portal does not issue its own tokens. Clients authenticate with the
//! Auth0 tenant and present an RS256 access token; we validate it against the
//! tenant's published JWKS and trust the `sub` claim as the stable identity.
//!
//! Carried in `AppState` as `Arc<dyn TokenVerifier>` so handlers and
//! extractors never care which backend is wired in.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;

/// Claims we read from a verified access token.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    /// Stable subject identifier, e.g. `auth0|64ac…`. Keyed against `users.auth0_id`.
    pub sub: String,
    pub email: Option<String>,
}

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Claims, AppError>;
}

#[derive(Debug, Deserialize)]
struct Jwks {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    kty: String,
    n: Option<String>,
    e: Option<String>,
}

/// Production verifier: RS256 keys fetched once from the tenant's JWKS
/// endpoint at startup. Key rotation requires a process restart.
pub struct JwksVerifier {
    issuer: String,
    audience: String,
    keys: HashMap<String, DecodingKey>,
}

impl JwksVerifier {
    /// Fetches `https://{domain}/.well-known/jwks.json` and indexes the RSA
    /// signing keys by `kid`.
    pub async fn discover(domain: &str, audience: &str) -> Result<Self> {
        let issuer = format!("https://{domain}/");
        let url = format!("https://{domain}/.well-known/jwks.json");

        let jwks: Jwks = reqwest::get(&url)
            .await
            .with_context(|| format!("Failed to fetch JWKS from {url}"))?
            .json()
            .await
            .context("Failed to parse JWKS response")?;

        let keys = index_rsa_keys(jwks)?;
        if keys.is_empty() {
            anyhow::bail!("JWKS at {url} contains no usable RSA keys");
        }

        info!("Loaded {} signing key(s) from {url}", keys.len());
        Ok(JwksVerifier {
            issuer,
            audience: audience.to_string(),
            keys,
        })
    }
}

fn index_rsa_keys(jwks: Jwks) -> Result<HashMap<String, DecodingKey>> {
    let mut keys = HashMap::new();
    for jwk in jwks.keys {
        if jwk.kty != "RSA" {
            continue;
        }
        let (Some(n), Some(e)) = (&jwk.n, &jwk.e) else {
            warn!("Skipping RSA key '{}' with missing modulus/exponent", jwk.kid);
            continue;
        };
        let key = DecodingKey::from_rsa_components(n, e)
            .with_context(|| format!("Invalid RSA components for key '{}'", jwk.kid))?;
        keys.insert(jwk.kid, key);
    }
    Ok(keys)
}

#[async_trait]
impl TokenVerifier for JwksVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let header = decode_header(token).map_err(|_| AppError::Unauthorized)?;
        let kid = header.kid.ok_or(AppError::Unauthorized)?;
        let key = self.keys.get(&kid).ok_or(AppError::Unauthorized)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_issuer(&[self.issuer.as_str()]);

        let data = decode::<Claims>(token, key, &validation).map_err(|e| {
            warn!("Token rejected: {e}");
            AppError::Unauthorized
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JWKS: &str = r#"{
        "keys": [
            {"kid": "key-1", "kty": "RSA", "use": "sig", "alg": "RS256",
             "n": "sXchDaQebHnPiGvyDOAT4saGEUetSyo9MKLOoWFsueri23bOdgWp4Dy1WlUzewbgBHod5pcM9H95GQRV3JDXboIRROSBigeC5yjU1hGzHHyXss8UDprecbAYxknTcQkhslANGRUZmdTOQ5qTRsLAt6BTYuyvVRdhS8exSZEy_c4gs_7svlJJQ4H9_NxsiIoLwAEk7-Q3UXERGYw_75IDrGA84-lA_-Ct4eTlXHBIY2EaV7t7LjJaYcB308hKZPfpZWnQqzsQqlgi7ScqXQh0A9WUrRJQIF_lLLPM17TfZk95s_BLl1udRMSPJfD5aGsWF9WkzsBWH7V_CvQrf1n-zfE",
             "e": "AQAB"},
            {"kid": "key-ec", "kty": "EC", "crv": "P-256"}
        ]
    }"#;

    #[test]
    fn test_jwks_parses_and_indexes_rsa_keys_only() {
        let jwks: Jwks = serde_json::from_str(SAMPLE_JWKS).unwrap();
        assert_eq!(jwks.keys.len(), 2);

        let keys = index_rsa_keys(jwks).unwrap();
        assert_eq!(keys.len(), 1);
        assert!(keys.contains_key("key-1"));
    }

    #[test]
    fn test_empty_jwks_yields_no_keys() {
        let jwks: Jwks = serde_json::from_str(r#"{"keys": []}"#).unwrap();
        assert!(index_rsa_keys(jwks).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        let verifier = JwksVerifier {
            issuer: "https://tenant.auth0.com/".to_string(),
            audience: "https://tnp-api".to_string(),
            keys: HashMap::new(),
        };
        let result = verifier.verify("not-a-jwt").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
