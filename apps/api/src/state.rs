use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::auth::verifier::TokenVerifier;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    /// Bearer-token verifier. Production: `JwksVerifier` against the Auth0 tenant.
    pub verifier: Arc<dyn TokenVerifier>,
    pub config: Config,
}
