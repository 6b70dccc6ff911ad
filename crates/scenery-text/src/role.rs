use serde::{Deserialize, Serialize};
use std::fmt;

use scenery_core::VAlign;

/// Known text element types of a lesson template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    CourseTitle,
    Subtitle,
    LowerthirdName,
    SectionMarker,
    HeadingH1,
    HeadingH2,
    HeadingH3,
    BodyBullet,
    DefinitionTerm,
    StepLabel,
    CodeSnippet,
    Equation,
    ChartLabels,
    DataLabels,
    Captions,
    SpeakerLabel,
    QuizQuestion,
    QuizChoices,
    QuizFeedback,
    Cta,
    ProgressUi,
    Timestamp,
    LegalCredits,
}

impl TextRole {
    pub const ALL: [TextRole; 23] = [
        TextRole::CourseTitle,
        TextRole::Subtitle,
        TextRole::LowerthirdName,
        TextRole::SectionMarker,
        TextRole::HeadingH1,
        TextRole::HeadingH2,
        TextRole::HeadingH3,
        TextRole::BodyBullet,
        TextRole::DefinitionTerm,
        TextRole::StepLabel,
        TextRole::CodeSnippet,
        TextRole::Equation,
        TextRole::ChartLabels,
        TextRole::DataLabels,
        TextRole::Captions,
        TextRole::SpeakerLabel,
        TextRole::QuizQuestion,
        TextRole::QuizChoices,
        TextRole::QuizFeedback,
        TextRole::Cta,
        TextRole::ProgressUi,
        TextRole::Timestamp,
        TextRole::LegalCredits,
    ];

    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == id)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextRole::CourseTitle => "course_title",
            TextRole::Subtitle => "subtitle",
            TextRole::LowerthirdName => "lowerthird_name",
            TextRole::SectionMarker => "section_marker",
            TextRole::HeadingH1 => "heading_h1",
            TextRole::HeadingH2 => "heading_h2",
            TextRole::HeadingH3 => "heading_h3",
            TextRole::BodyBullet => "body_bullet",
            TextRole::DefinitionTerm => "definition_term",
            TextRole::StepLabel => "step_label",
            TextRole::CodeSnippet => "code_snippet",
            TextRole::Equation => "equation",
            TextRole::ChartLabels => "chart_labels",
            TextRole::DataLabels => "data_labels",
            TextRole::Captions => "captions",
            TextRole::SpeakerLabel => "speaker_label",
            TextRole::QuizQuestion => "quiz_question",
            TextRole::QuizChoices => "quiz_choices",
            TextRole::QuizFeedback => "quiz_feedback",
            TextRole::Cta => "cta",
            TextRole::ProgressUi => "progress_ui",
            TextRole::Timestamp => "timestamp",
            TextRole::LegalCredits => "legal_credits",
        }
    }

    /// Vertical alignment of the element inside its rect.
    pub fn v_align(&self) -> VAlign {
        match self {
            TextRole::SectionMarker
            | TextRole::Equation
            | TextRole::QuizQuestion
            | TextRole::QuizFeedback
            | TextRole::Cta => VAlign::Center,
            TextRole::Captions => VAlign::Bottom,
            _ => VAlign::Top,
        }
    }

    /// Captions get a translucent plate behind the text.
    pub fn is_caption(&self) -> bool {
        matches!(self, TextRole::Captions)
    }
}

impl fmt::Display for TextRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
