//! Display models built from fetched payloads. The components in
//! [`super::view`] only ever render these.

use api::ConceptPayload;

use crate::core::format::{display_formula, non_blank, overview_paragraphs};

/// Optional structured parts of a concept, in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConceptSection {
    CoreIdea,
    RealWorldApplication,
    MathematicalDemonstration,
    StudyPlan,
}

impl ConceptSection {
    pub const ALL: [ConceptSection; 4] = [
        ConceptSection::CoreIdea,
        ConceptSection::RealWorldApplication,
        ConceptSection::MathematicalDemonstration,
        ConceptSection::StudyPlan,
    ];

    /// Wire field name; doubles as a CSS modifier.
    pub fn field(self) -> &'static str {
        match self {
            ConceptSection::CoreIdea => "core_idea",
            ConceptSection::RealWorldApplication => "real_world_application",
            ConceptSection::MathematicalDemonstration => "mathematical_demonstration",
            ConceptSection::StudyPlan => "study_plan",
        }
    }

    pub fn body(self, payload: &ConceptPayload) -> Option<&str> {
        let raw = match self {
            ConceptSection::CoreIdea => payload.core_idea.as_deref(),
            ConceptSection::RealWorldApplication => payload.real_world_application.as_deref(),
            ConceptSection::MathematicalDemonstration => {
                payload.mathematical_demonstration.as_deref()
            }
            ConceptSection::StudyPlan => payload.study_plan.as_deref(),
        };
        non_blank(raw)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConceptView {
    /// `None` renders the generic "Concept" title.
    pub title: Option<String>,
    /// Formula already wrapped in display-math delimiters.
    pub formula: Option<String>,
    /// Markup supplied by the backend.
    pub explanation: Option<String>,
    pub sections: Vec<(ConceptSection, String)>,
    /// Practice questions to list under the concept.
    pub questions: Vec<String>,
}

impl ConceptView {
    /// `problems` are the question ids the host page assigned to this
    /// concept; without them the payload's own list is used.
    pub fn from_payload(payload: &ConceptPayload, problems: Option<&[String]>) -> Self {
        let sections = ConceptSection::ALL
            .iter()
            .filter_map(|section| {
                section
                    .body(payload)
                    .map(|body| (*section, body.to_string()))
            })
            .collect();

        let questions = match problems {
            Some(ids) if !ids.is_empty() => ids.to_vec(),
            _ => payload.questions.clone(),
        };

        Self {
            title: non_blank(payload.name.as_deref()).map(str::to_string),
            formula: non_blank(payload.formula.as_deref()).map(display_formula),
            explanation: non_blank(payload.explanation.as_deref()).map(str::to_string),
            sections,
            questions,
        }
    }
}

/// What the content area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    /// A fetch is outstanding; `overview` picks the waiting message.
    Loading { overview: bool },
    Overview { paragraphs: Vec<String> },
    OverviewUnavailable,
    Concept(ConceptView),
    ConceptUnavailable,
}

impl Panel {
    pub fn overview(text: &str) -> Self {
        Panel::Overview {
            paragraphs: overview_paragraphs(text),
        }
    }

    pub fn is_overview(&self) -> bool {
        matches!(
            self,
            Panel::Loading { overview: true } | Panel::Overview { .. } | Panel::OverviewUnavailable
        )
    }
}
