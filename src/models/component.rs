//! Structured UI components carried by agent responses.
//!
//! The backend can answer with a structured payload instead of prose: a
//! `content` summary plus an ordered list of components (cards, alerts,
//! action buttons). Components arrive as JSON objects tagged by a `type`
//! field; unknown types degrade to plain text so old clients keep working.

use serde::{Deserialize, Serialize};

/// Severity level for alert components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    #[default]
    Info,
    Warning,
    Success,
    Error,
}

impl AlertLevel {
    /// CSS-style class suffix used by the renderer.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Info => "info",
            AlertLevel::Warning => "warning",
            AlertLevel::Success => "success",
            AlertLevel::Error => "error",
        }
    }
}

/// A typed UI fragment the backend asks the widget to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ComponentPayload", into = "ComponentPayload")]
pub enum UIComponent {
    Text {
        title: Option<String>,
        content: String,
    },
    Card {
        title: Option<String>,
        content: String,
        data: Option<serde_json::Value>,
    },
    Alert {
        title: Option<String>,
        content: String,
        alert_level: AlertLevel,
    },
    ActionButton {
        title: Option<String>,
        content: String,
        data: Option<serde_json::Value>,
    },
    /// The backend schema names charts but the widget has no chart renderer;
    /// they fall back to text at render time.
    Chart {
        title: Option<String>,
        content: String,
        data: Option<serde_json::Value>,
    },
}

impl UIComponent {
    /// The text content of the component.
    pub fn content(&self) -> &str {
        match self {
            UIComponent::Text { content, .. }
            | UIComponent::Card { content, .. }
            | UIComponent::Alert { content, .. }
            | UIComponent::ActionButton { content, .. }
            | UIComponent::Chart { content, .. } => content,
        }
    }

    /// The optional title of the component.
    pub fn title(&self) -> Option<&str> {
        match self {
            UIComponent::Text { title, .. }
            | UIComponent::Card { title, .. }
            | UIComponent::Alert { title, .. }
            | UIComponent::ActionButton { title, .. }
            | UIComponent::Chart { title, .. } => title.as_deref(),
        }
    }

    /// The message an action button re-submits when activated:
    /// `data.payload` when present, else the title, else the content.
    pub fn action_payload(&self) -> &str {
        if let UIComponent::ActionButton { title, content, data } = self {
            if let Some(payload) = data
                .as_ref()
                .and_then(|d| d.get("payload"))
                .and_then(|p| p.as_str())
            {
                return payload;
            }
            return title.as_deref().unwrap_or(content);
        }
        self.title().unwrap_or_else(|| self.content())
    }
}

/// Wire-shape intermediate for component deserialization.
///
/// The backend sends a flat object with a `type` string; decoding through
/// this payload lets unknown types map to the text fallback instead of
/// failing the whole event.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ComponentPayload {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default)]
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alert_level: Option<AlertLevel>,
}

impl From<ComponentPayload> for UIComponent {
    fn from(p: ComponentPayload) -> Self {
        match p.kind.as_str() {
            "card" => UIComponent::Card {
                title: p.title,
                content: p.content,
                data: p.data,
            },
            "alert" => UIComponent::Alert {
                title: p.title,
                content: p.content,
                alert_level: p.alert_level.unwrap_or_default(),
            },
            "action_button" => UIComponent::ActionButton {
                title: p.title,
                content: p.content,
                data: p.data,
            },
            "chart" => UIComponent::Chart {
                title: p.title,
                content: p.content,
                data: p.data,
            },
            // "text" and anything unrecognized
            _ => UIComponent::Text {
                title: p.title,
                content: p.content,
            },
        }
    }
}

impl From<UIComponent> for ComponentPayload {
    fn from(c: UIComponent) -> Self {
        match c {
            UIComponent::Text { title, content } => ComponentPayload {
                kind: "text".to_string(),
                title,
                content,
                data: None,
                alert_level: None,
            },
            UIComponent::Card { title, content, data } => ComponentPayload {
                kind: "card".to_string(),
                title,
                content,
                data,
                alert_level: None,
            },
            UIComponent::Alert {
                title,
                content,
                alert_level,
            } => ComponentPayload {
                kind: "alert".to_string(),
                title,
                content,
                data: None,
                alert_level: Some(alert_level),
            },
            UIComponent::ActionButton { title, content, data } => ComponentPayload {
                kind: "action_button".to_string(),
                title,
                content,
                data,
                alert_level: None,
            },
            UIComponent::Chart { title, content, data } => ComponentPayload {
                kind: "chart".to_string(),
                title,
                content,
                data,
                alert_level: None,
            },
        }
    }
}

/// The structured payload a content event can carry: an optional summary
/// plus the ordered component list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredContent {
    /// Optional summary text rendered before the components.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Ordered sequence of components to render.
    pub components: Vec<UIComponent>,
}
