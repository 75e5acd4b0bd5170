//! API State Management

use axum::http::{header::AUTHORIZATION, HeaderMap};
use bloomex_economics::VestingEngine;
use std::sync::Arc;

use crate::{ApiError, ApiResult};

#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<VestingEngine>,
    pub admin_token: Option<String>,
    pub start_time: std::time::Instant,
}

impl ApiState {
    pub fn new(engine: Arc<VestingEngine>, admin_token: Option<String>) -> Self {
        Self {
            engine,
            admin_token,
            start_time: std::time::Instant::now(),
        }
    }

    /// Check the bearer token on admin requests. Without a configured token
    /// the admin surface is open (dev mode).
    pub fn require_admin(&self, headers: &HeaderMap) -> ApiResult<()> {
        let Some(expected) = self.admin_token.as_deref() else {
            return Ok(());
        };

        let provided = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

        if provided != expected {
            return Err(ApiError::Unauthorized("invalid admin token".to_string()));
        }
        Ok(())
    }
}

/// Current wall-clock time as a unix timestamp
pub fn now() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(token: Option<&str>) -> ApiState {
        ApiState::new(Arc::new(VestingEngine::new(0)), token.map(str::to_string))
    }

    #[test]
    fn test_require_admin() {
        let mut headers = HeaderMap::new();
        assert!(state(None).require_admin(&headers).is_ok());
        assert!(state(Some("secret")).require_admin(&headers).is_err());

        headers.insert(AUTHORIZATION, "Bearer wrong".parse().unwrap());
        assert!(state(Some("secret")).require_admin(&headers).is_err());

        headers.insert(AUTHORIZATION, "Bearer secret".parse().unwrap());
        assert!(state(Some("secret")).require_admin(&headers).is_ok());
    }
}
