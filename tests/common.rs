//! Common test utilities for building flow graphs.
use cepflow::prelude::*;

/// Creates an ATOMIC node with a strict single-match quantifier.
#[allow(dead_code)]
pub fn atomic(id: &str, name: &str, condition: Option<&str>) -> FlowNode {
    FlowNode::new(
        id,
        NodePayload::Atomic(PatternData {
            name: name.to_string(),
            label: None,
            quantifier: Quantifier::single(),
            condition: condition.map(str::to_string),
            times: None,
            window: None,
        }),
    )
}

/// Creates a COMPOSITE group node.
#[allow(dead_code)]
pub fn composite(id: &str, name: &str) -> FlowNode {
    FlowNode::new(
        id,
        NodePayload::Composite(PatternData {
            name: name.to_string(),
            label: None,
            quantifier: Quantifier::single(),
            condition: None,
            times: None,
            window: None,
        }),
    )
}

/// Creates an LLM inference compute node with plausible defaults.
#[allow(dead_code)]
pub fn llm(id: &str, name: &str) -> FlowNode {
    FlowNode::new(
        id,
        NodePayload::LlmInference(LlmInferenceData {
            name: name.to_string(),
            label: None,
            model_provider: "OpenAI".to_string(),
            model: "o1".to_string(),
            prompt_template: "Summarize the matched events.".to_string(),
            prompt_variables: Vec::new(),
            temperature: Some(0.7),
            top_p: Some(1.0),
            capabilities: Vec::new(),
            knowledge_bases: Vec::new(),
            output_actions: Vec::new(),
        }),
    )
}

/// Creates a formatted-output compute node.
#[allow(dead_code)]
pub fn format_output(id: &str, name: &str) -> FlowNode {
    FlowNode::new(
        id,
        NodePayload::FormatOutput(FormatOutputData {
            name: name.to_string(),
            label: None,
            output_actions: Vec::new(),
        }),
    )
}

/// Creates a strategy edge with the engine-default consuming strategy.
#[allow(dead_code)]
pub fn strategy_edge(id: &str, source: &str, target: &str) -> FlowEdge {
    FlowEdge::strategy(id, source, target, Some(ConsumingStrategy::SkipTillNext))
}

/// Creates a compute edge feeding a compute node's input.
#[allow(dead_code)]
pub fn compute_edge(id: &str, source: &str, target: &str) -> FlowEdge {
    FlowEdge::compute(id, source, target)
}

/// A looping quantifier as the editor produces for TIMES-based nodes.
#[allow(dead_code)]
pub fn looping_quantifier() -> Quantifier {
    Quantifier {
        consuming_strategy: ConsumingStrategy::Strict,
        inner_consuming_strategy: ConsumingStrategy::SkipTillNext,
        properties: vec![QuantifierProperty::Looping],
    }
}

/// A one-minute FIRST_AND_LAST window.
#[allow(dead_code)]
pub fn minute_window() -> Window {
    Window {
        kind: Default::default(),
        time: TimeSpec {
            unit: TimeUnit::Seconds,
            size: 60,
        },
    }
}
