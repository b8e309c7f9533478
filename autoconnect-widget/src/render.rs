//! Plain-text rendering of the widget transcript and the admin panel, one line per row.

use autoconnect_core::{CardList, Message, MessageBody, Origin, VariantDetail, VehicleVariant};

use crate::admin::CrawlPanel;
use crate::widget::ChatWidget;

fn prefix(origin: Origin) -> &'static str {
    match origin {
        Origin::User => "You",
        Origin::Assistant => "Assistant",
    }
}

fn variant_lines(v: &VehicleVariant) -> Vec<String> {
    let mut lines = vec![v.title()];
    if let Some(year) = v.year {
        lines.push(year.to_string());
    }
    let descriptors = v.descriptors();
    if !descriptors.is_empty() {
        lines.push(descriptors);
    }
    if let Some(price) = &v.price {
        lines.push(format!("Price: {}", price));
    }
    if let Some(image) = &v.image {
        lines.push(format!("Image: {}", image));
    }
    lines
}

fn detail_lines(d: &VariantDetail) -> Vec<String> {
    let mut lines = variant_lines(&d.variant);
    for (key, value) in d.spec_lines() {
        lines.push(format!("{}: {}", key, value));
    }
    for feature in &d.features {
        lines.push(format!("- {}", feature));
    }
    lines
}

fn carousel_lines<T>(
    label: &str,
    list: &CardList<T>,
    card: impl Fn(&T) -> Vec<String>,
) -> Vec<String> {
    let Some(current) = list.current() else {
        return Vec::new();
    };
    let mut lines = vec![format!("[{}]", label)];
    lines.extend(card(current).into_iter().map(|l| format!("  {}", l)));
    if list.carousel.shows_controls() {
        lines.push(format!(
            "  < {}/{} >  [Show Interest]",
            list.carousel.index() + 1,
            list.carousel.len()
        ));
    } else {
        lines.push("  [Show Interest]".to_string());
    }
    lines
}

/// Lines for one message. The lead form only renders while it is open.
pub fn render_message(message: &Message, lead_form_visible: bool) -> Vec<String> {
    let who = prefix(message.origin);
    match &message.body {
        MessageBody::PlainText {
            text,
            suggestions,
            citations,
        } => {
            let mut lines = vec![format!("{}: {}", who, text)];
            for (i, s) in suggestions.iter().enumerate() {
                lines.push(format!("  ({}) {}", i + 1, s));
            }
            for c in citations {
                lines.push(format!("  source: {}", c));
            }
            lines
        }
        MessageBody::ModelList { models } => {
            let mut lines = vec![format!("{}: Choose a model:", who)];
            for (i, m) in models.iter().enumerate() {
                lines.push(format!("  [{}] {}", i + 1, m));
            }
            lines
        }
        MessageBody::VariantList {
            variants,
            recommendations,
        } => {
            let mut lines = carousel_lines("Variants", variants, variant_lines);
            lines.extend(carousel_lines(
                "Recommended",
                recommendations,
                variant_lines,
            ));
            lines
        }
        MessageBody::VariantDetail { details } => details
            .iter()
            .enumerate()
            .flat_map(|(i, d)| {
                let mut lines = vec![format!("[Detail {}]", i + 1)];
                lines.extend(detail_lines(d).into_iter().map(|l| format!("  {}", l)));
                lines.push("  [Show Interest]".to_string());
                lines
            })
            .collect(),
        MessageBody::Comparison { variants } => {
            carousel_lines("Compare", variants, detail_lines)
        }
        MessageBody::LeadForm if lead_form_visible => vec![
            "[Lead form] Your Name / Your Email / Submit Interest".to_string(),
        ],
        MessageBody::LeadForm => Vec::new(),
    }
}

/// Lines for the whole open widget, including the typing indicator and quick actions.
pub fn render_widget(widget: &ChatWidget) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for (index, message) in widget.transcript().iter().enumerate() {
        for line in render_message(message, widget.lead_form_visible()) {
            lines.push(format!("#{:<3} {}", index, line));
        }
    }
    if widget.is_typing() {
        lines.push("Assistant is typing...".to_string());
    }
    if widget.quick_actions_visible() {
        lines.push("[Queries] [Show Cars]".to_string());
    }
    lines
}

/// Lines for the crawl admin panel.
pub fn render_crawl_panel(panel: &CrawlPanel) -> Vec<String> {
    let mut lines = Vec::new();
    if panel.is_loading() {
        lines.push("Loading...".to_string());
    }
    if let Some(warning) = panel.warning() {
        lines.push(format!("Warning: {}", warning));
    }
    if let Some(error) = panel.error() {
        lines.push(format!("Error: {}", error));
    }
    if let Some(view) = panel.summary_view() {
        lines.push(view.banner.to_string());
        for (label, value) in &view.stats {
            lines.push(format!("{}: {}", label, value));
        }
        lines.push("Processed URLs".to_string());
        for link in &view.links {
            lines.push(format!("  {}", link));
        }
    }
    lines
}
