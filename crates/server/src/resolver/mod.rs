//! Tiered intent resolver.
//!
//! Free text is turned into an [`IntentDecision`] by trying, in order:
//! greetings, layout keywords, primitive shapes, the local asset catalog, and
//! finally the remote model. Resolution never fails; every dead end degrades
//! to a small accent box.

pub mod sanitize;
pub mod vocab;

use std::sync::Arc;
use std::time::Duration;

use shared::{IntentDecision, PrimitiveParams, ACCENT_COLOR, DEFAULT_SIZE};

use crate::ai::RemoteGenerator;
use crate::error::with_timeout;
use crate::fuzzy::{exact_match, fuzzy_match};
use crate::layout;

pub const GREETING_REPLY: &str =
    "Hello! I'm ready to build. Try \"red box\", \"car\" or \"2bhk\".";
pub const CHAT_REPLY: &str = "I'm here. Tell me what to build and I'll put it in the scene.";
const EMPTY_REPLY: &str = "Type something to build, like \"blue sphere 3\".";

/// Size bounds for sizes parsed from user text
const MIN_TEXT_SIZE: f64 = 1.0;

const PROMPT_TEMPLATE: &str = r#"You are the intent classifier of a 3D scene builder.
Reply with exactly one JSON object and nothing else. No markdown, no prose.

Choose one "mode":
- "CHAT": small talk. Fields: "reply" (short answer).
- "PRIMITIVE": a basic shape. Fields: "shape" (box|sphere|cylinder|cone), "size" (1-20), "color" (name or #rrggbb).
- "PROP": a ready-made object such as furniture, a vehicle or an animal. Fields: "searchKeyword" (one lowercase noun).
- "BLUEPRINT": a house, apartment, 2BHK or other building. Fields: "projectName".

Example: {"mode": "BLUEPRINT", "projectName": "2BHK Apartment"}

User message: "#;

/// Converts free text into a structured decision
pub struct Resolver {
    remote: Option<Arc<dyn RemoteGenerator>>,
    timeout: Duration,
}

impl Resolver {
    pub fn new(remote: Option<Arc<dyn RemoteGenerator>>, timeout: Duration) -> Self {
        Self { remote, timeout }
    }

    /// Resolver with no remote tier
    pub fn local_only() -> Self {
        Self::new(None, Duration::from_secs(15))
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Resolve `text`; always yields a decision
    pub async fn resolve(&self, text: &str) -> IntentDecision {
        if let Some(decision) = self.resolve_local(text) {
            return decision;
        }
        self.resolve_remote(text).await
    }

    /// Local tiers only; `None` means the remote tier is needed
    pub fn resolve_local(&self, text: &str) -> Option<IntentDecision> {
        let lower = text.trim().to_lowercase();
        if lower.is_empty() {
            return Some(IntentDecision::Chat {
                reply: EMPTY_REPLY.to_string(),
            });
        }

        if is_greeting(&lower) {
            tracing::debug!("greeting tier hit");
            return Some(IntentDecision::Chat {
                reply: GREETING_REPLY.to_string(),
            });
        }

        if let Some(template) = layout::find_template(&lower) {
            tracing::debug!(template = template.key, "layout tier hit");
            return Some(IntentDecision::GenerateLayout {
                project_name: template.key.to_uppercase(),
                rooms: layout::generate_layout(template.key),
            });
        }

        if let Some(params) = shape_tier(&lower) {
            tracing::debug!(shape = params.shape.as_str(), "shape tier hit");
            return Some(IntentDecision::GeneratePrimitive(params));
        }

        if let Some(keyword) = fuzzy_match(&lower, vocab::CATALOG) {
            tracing::debug!(keyword, "catalog tier hit");
            return Some(IntentDecision::SearchAsset {
                keyword: keyword.to_string(),
            });
        }

        None
    }

    /// Remote tier alone, for callers that already ran [`Resolver::resolve_local`]
    pub async fn resolve_remote(&self, text: &str) -> IntentDecision {
        let Some(remote) = &self.remote else {
            tracing::info!("No remote generator configured, using default primitive");
            return fallback_decision();
        };

        let prompt = build_prompt(text);
        let raw = match with_timeout(self.timeout, remote.generate(&prompt)).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Remote generation failed: {e}");
                return fallback_decision();
            }
        };

        match sanitize::parse_reply(&raw).and_then(|reply| reply.into_decision(text)) {
            Some(decision) => decision,
            None => {
                tracing::warn!("Model output rejected, using default primitive");
                fallback_decision()
            }
        }
    }
}

/// Default decision for every unrecoverable path
pub fn fallback_decision() -> IntentDecision {
    IntentDecision::GeneratePrimitive(PrimitiveParams::fallback())
}

fn build_prompt(text: &str) -> String {
    // JSON-quote the message so it cannot break out of the instruction
    let quoted = serde_json::to_string(text).unwrap_or_default();
    format!("{PROMPT_TEMPLATE}{quoted}")
}

/// Whole input is a greeting, or starts with one followed by a non-alphanumeric char
fn is_greeting(lower: &str) -> bool {
    vocab::GREETINGS.iter().any(|greeting| {
        lower == *greeting
            || lower
                .strip_prefix(greeting)
                .and_then(|rest| rest.chars().next())
                .is_some_and(|c| !c.is_alphanumeric())
    })
}

/// An exact shape word anywhere in the text wins over a fuzzy hit on an earlier token
fn shape_tier(lower: &str) -> Option<PrimitiveParams> {
    let shape =
        exact_match(lower, vocab::SHAPES).or_else(|| fuzzy_match(lower, vocab::SHAPES))?;

    let color = vocab::color_in(lower).unwrap_or(ACCENT_COLOR);
    let size = vocab::first_number(lower).unwrap_or(DEFAULT_SIZE);
    Some(PrimitiveParams::new(shape, size, color).clamped(MIN_TEXT_SIZE))
}
