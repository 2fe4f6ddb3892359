//! Cleanup of raw model output before structured parsing

use serde::Deserialize;
use shared::{IntentDecision, PrimitiveParams, Shape, ACCENT_COLOR, DEFAULT_SIZE};

use super::vocab;
use super::CHAT_REPLY;
use crate::layout;

const FENCE_OPENERS: &[&str] = &["```json", "```JSON", "```"];
const FENCE: &str = "```";

/// Mode values the model may answer with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RemoteMode {
    Chat,
    #[serde(alias = "SHAPE")]
    Primitive,
    #[serde(alias = "SEARCH")]
    Prop,
    #[serde(alias = "LAYOUT")]
    Blueprint,
}

/// Object the model is instructed to return
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteReply {
    pub mode: RemoteMode,
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub shape: Option<String>,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub search_keyword: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
}

fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = FENCE_OPENERS.iter().find_map(|f| text.strip_prefix(f)) {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }
    text.trim()
}

/// Slice from the first `{` to the last `}` after removing code fences
pub fn extract_object(raw: &str) -> Option<&str> {
    let text = strip_fences(raw);
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse the model output into a reply, `None` when unusable
pub fn parse_reply(raw: &str) -> Option<RemoteReply> {
    let object = extract_object(raw)?;
    match serde_json::from_str(object) {
        Ok(reply) => Some(reply),
        Err(e) => {
            tracing::warn!("Unparseable model output: {e}");
            None
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RemoteReply {
    /// Validate mode-specific fields; `None` when a required field is missing
    pub fn into_decision(self, text: &str) -> Option<IntentDecision> {
        match self.mode {
            RemoteMode::Chat => Some(IntentDecision::Chat {
                reply: non_empty(self.reply).unwrap_or_else(|| CHAT_REPLY.to_string()),
            }),
            RemoteMode::Primitive => {
                let shape = Shape::from_name(self.shape.as_deref()?)?;
                let color = self
                    .color
                    .as_deref()
                    .and_then(vocab::parse_color)
                    .unwrap_or_else(|| ACCENT_COLOR.to_string());
                let size = self.size.unwrap_or(DEFAULT_SIZE);
                Some(IntentDecision::GeneratePrimitive(
                    PrimitiveParams::new(shape, size, color).clamped(1.0),
                ))
            }
            RemoteMode::Prop => Some(IntentDecision::SearchAsset {
                keyword: non_empty(self.search_keyword)?.to_lowercase(),
            }),
            RemoteMode::Blueprint => {
                let project_name = non_empty(self.project_name)?;
                let source = if layout::find_template(&project_name).is_some() {
                    project_name.as_str()
                } else {
                    text
                };
                Some(IntentDecision::GenerateLayout {
                    rooms: layout::generate_layout(source),
                    project_name,
                })
            }
        }
    }
}
