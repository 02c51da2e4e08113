use crate::guard::{Guard, GuardError, GuardResult};
use async_trait::async_trait;
use axum::http::{Method, request::Parts};

/// Lets a request through only when its verb is exactly `expected`.
///
/// `HEAD` is not folded into `GET`.
#[derive(Debug, Clone)]
pub struct MethodGuard {
    expected: Method,
}

impl MethodGuard {
    pub fn new(expected: Method) -> Self {
        Self { expected }
    }

    pub fn expected(&self) -> &Method {
        &self.expected
    }
}

#[async_trait]
impl Guard for MethodGuard {
    async fn can_activate(&self, parts: &Parts) -> GuardResult {
        if parts.method == self.expected {
            return Ok(());
        }
        tracing::debug!(expected = %self.expected, actual = %parts.method, "method not allowed");
        Err(GuardError::MethodNotAllowed {
            expected: self.expected.clone(),
            actual: parts.method.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::to_bytes,
        http::{Request, StatusCode},
        response::IntoResponse,
    };

    fn parts(method: Method) -> Parts {
        let (parts, _) = Request::builder()
            .method(method)
            .uri("/todos/create/")
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[tokio::test]
    async fn test_matching_method_passes() {
        let guard = MethodGuard::new(Method::POST);
        assert!(guard.can_activate(&parts(Method::POST)).await.is_ok());
    }

    #[tokio::test]
    async fn test_head_is_not_get() {
        let guard = MethodGuard::new(Method::GET);
        assert!(guard.can_activate(&parts(Method::HEAD)).await.is_err());
    }

    #[tokio::test]
    async fn test_rejection_is_empty_405() {
        let guard = MethodGuard::new(Method::POST);
        let err = guard.can_activate(&parts(Method::GET)).await.unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }
}
