//! Chat session tests: typed commands driving a widget over in-memory backends.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use autoconnect_cli::{ChatCommand, ChatSession, Flow};
use autoconnect_core::{
    ApiError, ChatBackend, ChatReply, InventoryBackend, InventoryCar, Lead, LeadBackend, Result,
};
use autoconnect_widget::{ChatWidget, WidgetBackends};

struct EchoChat;

#[async_trait]
impl ChatBackend for EchoChat {
    async fn ask(&self, question: &str, _session_id: &str) -> Result<ChatReply> {
        Ok(ChatReply::Text {
            text: format!("You asked: {}", question),
            suggestions: vec!["Show variants".to_string()],
            citations: Vec::new(),
        })
    }
}

struct EmptyInventory;

#[async_trait]
impl InventoryBackend for EmptyInventory {
    async fn list_models(&self) -> Result<Vec<InventoryCar>> {
        Ok(Vec::new())
    }
}

struct RejectingLeads;

#[async_trait]
impl LeadBackend for RejectingLeads {
    async fn save_interest(&self, _lead: &Lead) -> Result<()> {
        Err(ApiError::Transport("offline".to_string()))
    }
}

fn session() -> ChatSession {
    let widget = ChatWidget::new(WidgetBackends {
        chat: Arc::new(EchoChat),
        inventory: Arc::new(EmptyInventory),
        leads: Arc::new(RejectingLeads),
    })
    .with_typing_delay(Duration::ZERO);
    ChatSession::new(widget)
}

fn lines(flow: Flow) -> Vec<String> {
    match flow {
        Flow::Continue(lines) => lines,
        Flow::Quit => panic!("session quit unexpectedly"),
    }
}

/// **Test: First flush prints the welcome message and the quick actions.**
#[tokio::test]
async fn test_first_flush_shows_welcome() {
    let mut session = session();
    assert!(session.widget().panel().is_open());

    let out = session.flush();
    assert!(out[0].starts_with("#0"));
    assert!(out[0].contains("Assistant:"));
    assert_eq!(out.last().map(String::as_str), Some("[Queries] [Show Cars]"));

    // Nothing new on the second flush except the still-visible quick actions.
    assert_eq!(session.flush(), vec!["[Queries] [Show Cars]".to_string()]);
}

/// **Test: Typing before Queries only prints a hint; after Queries the question is answered.**
#[tokio::test]
async fn test_queries_then_send() {
    let mut session = session();
    session.flush();

    let out = lines(session.handle(ChatCommand::parse("hello")).await);
    assert_eq!(out, vec!["Input is disabled; pick /queries first.".to_string(), "[Queries] [Show Cars]".to_string()]);

    let out = lines(session.handle(ChatCommand::parse("/queries")).await);
    assert_eq!(out.len(), 1);
    assert!(out[0].starts_with("#1"));

    let out = lines(session.handle(ChatCommand::parse("hello")).await);
    assert_eq!(out[0], "#2   You: hello");
    assert_eq!(out[1], "#3   Assistant: You asked: hello");
    assert_eq!(out[2], "  (1) Show variants");
}

/// **Test: Suggestion chips are selected by their 1-based number.**
#[tokio::test]
async fn test_select_suggestion() {
    let mut session = session();
    session.handle(ChatCommand::parse("/queries")).await;
    session.handle(ChatCommand::parse("hello")).await;

    let out = lines(session.handle(ChatCommand::parse("/suggest 3 1")).await);
    assert_eq!(out[0], "#4   You: Show variants");

    let out = lines(session.handle(ChatCommand::parse("/suggest 3 9")).await);
    assert_eq!(out, vec!["No suggestion 9 on message #3".to_string()]);
}

/// **Test: A closed panel blocks everything except /open, /help and /quit.**
#[tokio::test]
async fn test_closed_panel() {
    let mut session = session();
    session.handle(ChatCommand::Close).await;

    let out = lines(session.handle(ChatCommand::parse("/queries")).await);
    assert_eq!(out, vec!["Widget is closed; /open to show it.".to_string()]);
    assert!(session.widget().quick_actions_visible());

    // Reopening prints the transcript again from the top.
    let out = lines(session.handle(ChatCommand::Open).await);
    assert!(out[0].starts_with("#0"));

    assert_eq!(session.handle(ChatCommand::Quit).await, Flow::Quit);
}

/// **Test: Resize reports the clamped panel size.**
#[tokio::test]
async fn test_resize_is_clamped() {
    let mut session = session();
    session.flush();

    let out = lines(session.handle(ChatCommand::parse("/resize 1000 100")).await);
    assert_eq!(out[0], "Panel is 500x400");
}

/// **Test: Submitting without an open lead form is refused.**
#[tokio::test]
async fn test_submit_without_form() {
    let mut session = session();
    session.flush();

    let out = lines(session.handle(ChatCommand::SubmitLead).await);
    assert_eq!(out[0], "No lead form is open.");
}
