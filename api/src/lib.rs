//! HTTP client and wire model for the MathYou backend.

mod client;
mod error;
pub mod model;
mod source;

pub use client::HttpApi;
pub use error::ApiError;
pub use model::{
    Answer, ConceptPayload, GradeResult, LoginRequest, LoginResponse, OverviewPayload, Problem,
    ProblemKind, SubmitAnswerRequest,
};
pub use source::{AuthSource, ContentSource, QuestionSource};
