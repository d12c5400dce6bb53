//! Component-to-fragment mapping.
//!
//! Pure mapping from a typed `UIComponent` to a presentation fragment; no
//! state. Class names follow the widget stylesheet (`dm-*`).

use crate::models::UIComponent;

use super::markdown::markdown_to_html;
use super::node::HtmlNode;

/// Render one component to a presentation fragment.
pub fn render_component(component: &UIComponent) -> HtmlNode {
    match component {
        UIComponent::Card { title, content, data } => {
            let data_dump = data.as_ref().map(|d| {
                HtmlNode::element("div").attr("class", "dm-card-data").child(
                    HtmlNode::element("pre").child(HtmlNode::text(
                        serde_json::to_string_pretty(d).unwrap_or_default(),
                    )),
                )
            });
            HtmlNode::element("div")
                .attr("class", "dm-card")
                .maybe_child(title.as_ref().map(|t| {
                    HtmlNode::element("div")
                        .attr("class", "dm-card-title")
                        .child(HtmlNode::text(t))
                }))
                .child(
                    HtmlNode::element("div")
                        .attr("class", "dm-card-content")
                        .child(HtmlNode::Markup(markdown_to_html(content))),
                )
                .maybe_child(data_dump)
        }
        UIComponent::Alert {
            title,
            content,
            alert_level,
        } => {
            let node = HtmlNode::element("div")
                .attr("class", format!("dm-alert dm-alert-{}", alert_level.as_str()));
            let node = match title {
                Some(t) => node
                    .child(HtmlNode::element("strong").child(HtmlNode::text(t)))
                    .child(HtmlNode::Markup("<br>".to_string())),
                None => node,
            };
            node.child(HtmlNode::Markup(markdown_to_html(content)))
        }
        UIComponent::ActionButton { title, content, .. } => HtmlNode::element("button")
            .attr("class", "dm-action-button")
            .attr("data-payload", component.action_payload())
            .child(
                HtmlNode::element("div")
                    .attr("class", "dm-btn-content")
                    .maybe_child(title.as_ref().map(|t| {
                        HtmlNode::element("div")
                            .attr("class", "dm-btn-title")
                            .child(HtmlNode::text(t))
                    }))
                    .maybe_child(if content.is_empty() {
                        None
                    } else {
                        Some(
                            HtmlNode::element("div")
                                .attr("class", "dm-btn-desc")
                                .child(HtmlNode::text(content)),
                        )
                    }),
            ),
        // Text, charts and anything future-shaped render as markdown text
        UIComponent::Text { content, .. } | UIComponent::Chart { content, .. } => {
            HtmlNode::Markup(markdown_to_html(content))
        }
    }
}
