//! Seams the widgets are generic over. [`HttpApi`](crate::HttpApi) implements
//! all of them; tests substitute in-memory fakes.
#![allow(async_fn_in_trait)]

use crate::model::{
    ConceptPayload, GradeResult, LoginRequest, LoginResponse, OverviewPayload, Problem,
    SubmitAnswerRequest,
};
use crate::ApiError;

/// Overview and concept payloads for one discipline.
pub trait ContentSource {
    async fn fetch_overview(&self, discipline_id: &str) -> Result<OverviewPayload, ApiError>;

    async fn fetch_concept(
        &self,
        discipline_id: &str,
        concept_id: &str,
    ) -> Result<ConceptPayload, ApiError>;
}

/// Practice questions and grading.
pub trait QuestionSource {
    async fn fetch_question(&self, question_id: &str) -> Result<Problem, ApiError>;

    async fn fetch_next_question(&self, current_id: &str) -> Result<Problem, ApiError>;

    /// Fails with [`ApiError::Unauthorized`] when nobody is logged in.
    async fn submit_answer(&self, request: &SubmitAnswerRequest) -> Result<GradeResult, ApiError>;
}

pub trait AuthSource {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;
}
