//! # autoconnect-widget
//!
//! Headless versions of the two UI surfaces: [`ChatWidget`] (transcript, reply dispatch, typing
//! indicator, lead capture, carousels, panel geometry) and [`CrawlPanel`] (crawl admin form),
//! plus plain-text renderers for both. State is owned per instance; nothing is shared.

pub mod admin;
pub mod lead;
pub mod panel;
pub mod render;
pub mod widget;

pub use admin::{CrawlOutcome, CrawlPanel, CrawlSummaryView};
pub use lead::{LeadDraft, LeadFlow, LeadState};
pub use panel::Panel;
pub use render::{render_crawl_panel, render_message, render_widget};
pub use widget::{
    lead_confirmation, CardTarget, ChatWidget, LeadOutcome, QuickAction, SendOutcome,
    WidgetBackends, WidgetEvent,
};
