//! Interactive chat session: feeds typed commands into a [`ChatWidget`] and returns the lines to
//! print. Only messages appended since the last command (or re-rendered by a carousel move) are
//! printed.

use std::sync::Arc;

use anyhow::Result;
use autoconnect_client::{HttpChatBackend, HttpInventoryBackend, HttpLeadBackend, ServiceConfig};
use autoconnect_widget::{
    render_message, ChatWidget, LeadOutcome, SendOutcome, WidgetBackends, WidgetEvent,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

use crate::cli::{ChatCommand, HELP};

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(Vec<String>),
    Quit,
}

pub struct ChatSession {
    widget: ChatWidget,
    printed: usize,
}

impl ChatSession {
    /// Wraps a widget and opens its panel.
    pub fn new(mut widget: ChatWidget) -> Self {
        widget.panel_mut().open();
        Self { widget, printed: 0 }
    }

    pub fn widget(&self) -> &ChatWidget {
        &self.widget
    }

    fn message_lines(&self, index: usize) -> Vec<String> {
        match self.widget.transcript().get(index) {
            Some(message) => render_message(message, self.widget.lead_form_visible())
                .into_iter()
                .map(|line| format!("#{:<3} {}", index, line))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Lines for every message not printed yet, plus the quick actions when visible.
    pub fn flush(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        let len = self.widget.transcript().len();
        for index in self.printed..len {
            lines.extend(self.message_lines(index));
        }
        self.printed = len;
        if self.widget.quick_actions_visible() {
            lines.push("[Queries] [Show Cars]".to_string());
        }
        lines
    }

    pub async fn handle(&mut self, command: ChatCommand) -> Flow {
        if !self.widget.panel().is_open()
            && !matches!(command, ChatCommand::Open | ChatCommand::Quit | ChatCommand::Help)
        {
            return Flow::Continue(vec!["Widget is closed; /open to show it.".to_string()]);
        }

        let mut notes: Vec<String> = Vec::new();
        match command {
            ChatCommand::Quit => return Flow::Quit,
            ChatCommand::Help => notes.extend(HELP.lines().map(str::to_string)),
            ChatCommand::Invalid(usage) => notes.push(format!("Usage: {}", usage)),
            ChatCommand::Open => {
                self.widget.panel_mut().open();
                self.printed = 0;
            }
            ChatCommand::Close => {
                self.widget.panel_mut().close();
                return Flow::Continue(vec!["Widget closed.".to_string()]);
            }
            ChatCommand::Resize { width, height } => {
                let (w, h) = self.widget.panel_mut().resize(width, height);
                notes.push(format!("Panel is {}x{}", w, h));
            }
            ChatCommand::Drag { dx, dy } => {
                let (x, y) = self.widget.panel_mut().drag_by(dx, dy);
                notes.push(format!("Panel moved to ({}, {})", x, y));
            }
            ChatCommand::QuickAction(action) => self.widget.choose_quick_action(action),
            ChatCommand::Send(text) => {
                if self.widget.send_message(&text).await == SendOutcome::Ignored
                    && !self.widget.input_enabled()
                {
                    notes.push("Input is disabled; pick /queries first.".to_string());
                }
            }
            ChatCommand::SelectModel { message, model } => {
                if self.widget.select_model(message, model).await == SendOutcome::Ignored {
                    notes.push(format!("No model button {} on message #{}", model + 1, message));
                }
            }
            ChatCommand::SelectSuggestion {
                message,
                suggestion,
            } => {
                if self.widget.select_suggestion(message, suggestion).await == SendOutcome::Ignored
                {
                    notes.push(format!(
                        "No suggestion {} on message #{}",
                        suggestion + 1,
                        message
                    ));
                }
            }
            ChatCommand::Navigate {
                message,
                target,
                direction,
            } => match self.widget.navigate(message, target, direction) {
                Some(_) if message < self.printed => notes.extend(self.message_lines(message)),
                Some(_) => {}
                None => notes.push(format!("Message #{} has no such card list", message)),
            },
            ChatCommand::ShowInterest { message, target } => {
                if !self.widget.show_interest_in_card(message, target) {
                    notes.push("Lead form is already open or submitted.".to_string());
                }
            }
            ChatCommand::LeadName(name) => self.widget.set_lead_name(name),
            ChatCommand::LeadEmail(email) => self.widget.set_lead_email(email),
            ChatCommand::SubmitLead => match self.widget.submit_lead().await {
                LeadOutcome::Incomplete => notes.push("Name and email are required.".to_string()),
                LeadOutcome::NotShown => notes.push("No lead form is open.".to_string()),
                LeadOutcome::Submitted | LeadOutcome::Failed => {}
            },
        }

        let mut lines = notes;
        lines.extend(self.flush());
        Flow::Continue(lines)
    }
}

/// Backends built from the configured endpoints.
pub fn http_backends(config: &ServiceConfig) -> WidgetBackends {
    WidgetBackends {
        chat: Arc::new(HttpChatBackend::new(&config.chat_api_url)),
        inventory: Arc::new(HttpInventoryBackend::new(&config.inventory_api_url)),
        leads: Arc::new(HttpLeadBackend::new(&config.inventory_api_url)),
    }
}

/// Runs the chat REPL on stdin until `/quit` or end of input.
pub async fn run_chat(config: ServiceConfig) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut widget = ChatWidget::new(http_backends(&config))
        .with_typing_delay(config.typing_delay)
        .with_events(tx);
    info!(session_id = %widget.session_id(), "step: chat session started");

    let indicator = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if event == WidgetEvent::TypingStarted {
                println!("Assistant is typing...");
            }
        }
    });

    widget.load_inventory().await;
    let mut session = ChatSession::new(widget);
    for line in session.flush() {
        println!("{}", line);
    }

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = input.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match session.handle(ChatCommand::parse(&line)).await {
            Flow::Continue(lines) => {
                for line in lines {
                    println!("{}", line);
                }
            }
            Flow::Quit => break,
        }
    }

    drop(session);
    indicator.await?;
    info!("step: chat session ended");
    Ok(())
}
