use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::error::AppError;

/// `Json` whose rejections use the API error body
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordPlayRequest;
    use axum::body::Body;

    async fn extract(content_type: &str, body: &'static str) -> Result<RecordPlayRequest, AppError> {
        let request = Request::builder()
            .method("POST")
            .header("content-type", content_type)
            .body(Body::from(body))
            .unwrap();
        ApiJson::<RecordPlayRequest>::from_request(request, &())
            .await
            .map(|ApiJson(value)| value)
    }

    #[tokio::test]
    async fn test_valid_body() {
        let request = extract("application/json", r#"{"trackId": 5}"#).await.unwrap();
        assert_eq!(request.track_id, 5);
    }

    #[tokio::test]
    async fn test_wrong_field_type_is_invalid_input() {
        let result = extract("application/json", r#"{"trackId": "abc"}"#).await;
        assert!(matches!(result, Err(AppError::InvalidInput(msg)) if msg.contains("trackId")));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_invalid_input() {
        let result = extract("text/plain", r#"{"trackId": 5}"#).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
