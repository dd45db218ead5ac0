use serde::{Deserialize, Serialize};

/// Policy governing how overlapping matches are skipped or retained between
/// pattern steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsumingStrategy {
    Strict,
    #[default]
    SkipTillNext,
    SkipTillAny,
}

/// How many times a pattern node may match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuantifierProperty {
    Single,
    Optional,
    Looping,
    Times,
    TimesOrMore,
    Greedy,
}

/// Full match-cardinality specification for a pattern node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quantifier {
    pub consuming_strategy: ConsumingStrategy,
    pub inner_consuming_strategy: ConsumingStrategy,
    pub properties: Vec<QuantifierProperty>,
}

impl Quantifier {
    /// A strict single-match quantifier, the editor's default for new nodes.
    pub fn single() -> Self {
        Self {
            consuming_strategy: ConsumingStrategy::Strict,
            inner_consuming_strategy: ConsumingStrategy::SkipTillNext,
            properties: vec![QuantifierProperty::Single],
        }
    }
}

impl Default for Quantifier {
    fn default() -> Self {
        Self::single()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionKind {
    #[default]
    #[serde(rename = "EXPR")]
    Expr,
}

/// A typed condition expression attached to a pattern node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub kind: ConditionKind,
    pub expression: String,
}

impl Condition {
    pub fn expr(expression: impl Into<String>) -> Self {
        Self {
            kind: ConditionKind::Expr,
            expression: expression.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

/// A duration expressed in a unit the execution engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpec {
    pub unit: TimeUnit,
    pub size: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowKind {
    #[default]
    #[serde(rename = "FIRST_AND_LAST")]
    FirstAndLast,
}

/// A time bound constraining how far apart the first and last matched events
/// may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    #[serde(rename = "type")]
    pub kind: WindowKind,
    pub time: TimeSpec,
}

/// Repetition bounds for TIMES / TIMES_OR_MORE quantifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Times {
    pub from: u32,
    pub to: u32,
    pub window_time: Option<Window>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AfterMatchSkipKind {
    #[default]
    NoSkip,
    SkipToNext,
    SkipPastLastEvent,
    SkipToFirst,
    SkipToLast,
}

/// What the engine does with partial matches once a full match fires.
///
/// The editor does not expose this yet, so compiled documents always carry
/// the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AfterMatchSkipStrategy {
    #[serde(rename = "type")]
    pub kind: AfterMatchSkipKind,
    pub pattern_name: Option<String>,
}
