use serde::{Deserialize, Serialize};

use crate::pattern::{PatternKind, Quantifier, Times, Window};
use crate::validator::Diagnostic;

/// Absolute editor coordinates. Children of a COMPOSITE node are positioned
/// relative to their parent's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Rendered size of a node as last measured by the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// A node of the flat editor graph.
///
/// The payload is a tagged union selected by the serialized `kind` field;
/// nesting is expressed through the weak `parent_id` back-reference, never
/// through ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    pub id: String,
    #[serde(flatten)]
    pub payload: NodePayload,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measured: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl FlowNode {
    pub fn new(id: impl Into<String>, payload: NodePayload) -> Self {
        Self {
            id: id.into(),
            payload,
            position: Position::default(),
            parent_id: None,
            measured: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Position { x, y };
        self
    }

    pub fn with_measured(mut self, width: f64, height: f64) -> Self {
        self.measured = Some(Dimensions { width, height });
        self
    }
}

/// The per-kind payload of a flat node. Every transformation in the crate
/// switches exhaustively over this tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodePayload {
    Atomic(PatternData),
    Composite(PatternData),
    LlmInference(LlmInferenceData),
    FormatOutput(FormatOutputData),
}

impl NodePayload {
    pub fn name(&self) -> &str {
        match self {
            NodePayload::Atomic(d) | NodePayload::Composite(d) => &d.name,
            NodePayload::LlmInference(d) => &d.name,
            NodePayload::FormatOutput(d) => &d.name,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            NodePayload::Atomic(d) | NodePayload::Composite(d) => d.label.as_deref(),
            NodePayload::LlmInference(d) => d.label.as_deref(),
            NodePayload::FormatOutput(d) => d.label.as_deref(),
        }
    }

    /// The name shown to the user: the display label when set, the internal
    /// name otherwise.
    pub fn display_name(&self) -> &str {
        self.label().unwrap_or_else(|| self.name())
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, NodePayload::Atomic(_) | NodePayload::Composite(_))
    }

    pub fn is_compute(&self) -> bool {
        matches!(
            self,
            NodePayload::LlmInference(_) | NodePayload::FormatOutput(_)
        )
    }

    /// Pattern kind and data for ATOMIC/COMPOSITE payloads, `None` for
    /// compute payloads.
    pub fn as_pattern(&self) -> Option<(PatternKind, &PatternData)> {
        match self {
            NodePayload::Atomic(d) => Some((PatternKind::Atomic, d)),
            NodePayload::Composite(d) => Some((PatternKind::Composite, d)),
            NodePayload::LlmInference(_) | NodePayload::FormatOutput(_) => None,
        }
    }
}

/// Editor-side data for ATOMIC and COMPOSITE nodes. The condition is kept as
/// a plain expression string until compilation wraps it into a typed
/// [`Condition`](crate::pattern::Condition).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub quantifier: Quantifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub times: Option<Times>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<Window>,
}

/// A template variable binding for an LLM prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptVariable {
    pub variable: String,
    pub value: serde_json::Value,
}

/// A knowledge base attached to an LLM inference step, with retrieval
/// priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseRef {
    pub knowledge_base_id: String,
    pub priority: i32,
}

/// Configuration of an LLM inference compute step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmInferenceData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub model_provider: String,
    pub model: String,
    pub prompt_template: String,
    #[serde(default)]
    pub prompt_variables: Vec<PromptVariable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub knowledge_bases: Vec<KnowledgeBaseRef>,
    #[serde(default)]
    pub output_actions: Vec<String>,
}

/// One field written into an output action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValue {
    pub field_name: String,
    pub value: serde_json::Value,
}

/// Binds an output action to the field values it receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputActionBinding {
    pub action_ref: String,
    pub values: Vec<FieldValue>,
}

/// Configuration of a formatted-output compute step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatOutputData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub output_actions: Vec<OutputActionBinding>,
}
