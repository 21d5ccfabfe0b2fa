use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::model::{
    ConceptPayload, GradeResult, LoginRequest, LoginResponse, OverviewPayload, Problem,
    SubmitAnswerRequest,
};
use crate::source::{AuthSource, ContentSource, QuestionSource};
use crate::ApiError;

const OVERVIEW_PATH: &str = "/api/overview";
const CONCEPT_PATH: &str = "/api/concept";
const QUESTION_PATH: &str = "/api/question";
const NEXT_QUESTION_PATH: &str = "/api/question/next";
const SUBMIT_PATH: &str = "/api/question/submit_answer";
const LOGIN_PATH: &str = "/login";

/// A MathYou backend client.
///
/// Every call is a single request: no retries, no timeout, no caching.
/// Caching is the widgets' business.
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    client: Client,
}

impl HttpApi {
    /// Creates a client rooted at `base_url` (scheme and host, optional path prefix).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, ?query, "GET");
        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "request failed");
            return Err(ApiError::Status(status));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl ContentSource for HttpApi {
    async fn fetch_overview(&self, discipline_id: &str) -> Result<OverviewPayload, ApiError> {
        let payload: OverviewPayload = self
            .get_json(OVERVIEW_PATH, &[("discipline", discipline_id)])
            .await?;
        if payload.text().is_none() {
            return Err(ApiError::Missing("overview"));
        }
        Ok(payload)
    }

    async fn fetch_concept(
        &self,
        discipline_id: &str,
        concept_id: &str,
    ) -> Result<ConceptPayload, ApiError> {
        self.get_json(
            CONCEPT_PATH,
            &[("discipline", discipline_id), ("concept", concept_id)],
        )
        .await
    }
}

impl QuestionSource for HttpApi {
    async fn fetch_question(&self, question_id: &str) -> Result<Problem, ApiError> {
        self.get_json(&format!("{QUESTION_PATH}/{question_id}"), &[])
            .await
    }

    async fn fetch_next_question(&self, current_id: &str) -> Result<Problem, ApiError> {
        self.get_json(NEXT_QUESTION_PATH, &[("current_id", current_id)])
            .await
    }

    async fn submit_answer(&self, request: &SubmitAnswerRequest) -> Result<GradeResult, ApiError> {
        let url = self.url(SUBMIT_PATH);
        debug!(%url, question_id = %request.question_id, "POST answer");
        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        classify_submit(status, response.url().path())
            .inspect_err(|err| warn!(%url, %status, error = %err, "answer submission failed"))?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl AuthSource for HttpApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let url = self.url(LOGIN_PATH);
        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        parse_login(status, &body)
    }
}

/// Maps a submission's status and final URL path to an error, if any.
///
/// Unauthenticated submissions get bounced to the login page; the final URL
/// then no longer points at the submit endpoint.
fn classify_submit(status: StatusCode, final_path: &str) -> Result<(), ApiError> {
    if status == StatusCode::UNAUTHORIZED || !final_path.ends_with(SUBMIT_PATH) {
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() {
        return Err(ApiError::Status(status));
    }
    Ok(())
}

/// Rejected logins still carry a JSON body with a message, so the body is
/// tried first whatever the status.
fn parse_login(status: StatusCode, body: &[u8]) -> Result<LoginResponse, ApiError> {
    match serde_json::from_slice::<LoginResponse>(body) {
        Ok(parsed) => Ok(parsed),
        Err(_) if !status.is_success() => Err(ApiError::Status(status)),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let api = HttpApi::new("http://localhost:5000/");
        assert_eq!(api.base_url(), "http://localhost:5000");
        assert_eq!(api.url(OVERVIEW_PATH), "http://localhost:5000/api/overview");
    }

    #[test]
    fn question_urls_embed_the_id() {
        let api = HttpApi::new("https://mathyou.example");
        assert_eq!(
            api.url(&format!("{QUESTION_PATH}/dot_product_1")),
            "https://mathyou.example/api/question/dot_product_1"
        );
    }

    #[test]
    fn submit_401_is_unauthorized() {
        let result = classify_submit(StatusCode::UNAUTHORIZED, SUBMIT_PATH);
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[test]
    fn submit_bounced_to_login_is_unauthorized() {
        let landed = reqwest::Url::parse("http://localhost:5000/login?next=/api/question/submit_answer")
            .expect("valid url");
        let result = classify_submit(StatusCode::OK, landed.path());
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[test]
    fn submit_ok_on_the_submit_path_passes() {
        assert!(classify_submit(StatusCode::OK, "/prefix/api/question/submit_answer").is_ok());
        let result = classify_submit(StatusCode::INTERNAL_SERVER_ERROR, SUBMIT_PATH);
        assert!(matches!(result, Err(ApiError::Status(s)) if s == StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn rejected_login_keeps_its_message() {
        let body = br#"{"success":false,"message":"Wrong password"}"#;
        let parsed = parse_login(StatusCode::UNAUTHORIZED, body).expect("body parses");
        assert!(!parsed.success);
        assert_eq!(parsed.message.as_deref(), Some("Wrong password"));
    }

    #[test]
    fn login_error_without_json_reports_the_status() {
        let result = parse_login(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>");
        assert!(matches!(result, Err(ApiError::Status(s)) if s == StatusCode::INTERNAL_SERVER_ERROR));
        let result = parse_login(StatusCode::OK, b"not json");
        assert!(matches!(result, Err(ApiError::Json(_))));
    }
}
