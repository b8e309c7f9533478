//! Chat widget: owns one session's transcript and all transient UI state.
//!
//! Every backend call goes through the traits in autoconnect-core. Failures never escape: they
//! are appended to the transcript as fixed assistant texts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use autoconnect_core::{
    CardList, ChatBackend, Direction, InventoryBackend, InventoryCar, Lead, LeadBackend, Message,
    MessageBody, MessageKind, Origin, VehicleVariant,
};
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Instant;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::lead::{LeadDraft, LeadFlow, LeadState};
use crate::panel::Panel;

pub const WELCOME_TEXT: &str = "Welcome! How can I assist you today?";
pub const QUERIES_PROMPT: &str = "Sure, what would you like to know?";
pub const CHAT_ERROR_TEXT: &str = "Sorry, I encountered an error. Please try again later.";
pub const INVENTORY_ERROR_TEXT: &str = "Error fetching car variants. Please try again later.";
pub const LEAD_ERROR_TEXT: &str =
    "Sorry, there was an error saving your interest. Please try again later.";
pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_secs(1);

/// Confirmation appended after a lead is saved.
pub fn lead_confirmation(name: &str, email: &str, vehicle: &str) -> String {
    format!(
        "Thank you {}! We'll contact you at {} about the {}.",
        name, email, vehicle
    )
}

/// Backends the widget talks to.
#[derive(Clone)]
pub struct WidgetBackends {
    pub chat: Arc<dyn ChatBackend>,
    pub inventory: Arc<dyn InventoryBackend>,
    pub leads: Arc<dyn LeadBackend>,
}

/// Notifications for a front end that redraws while a request is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    TypingStarted,
    MessageAppended { index: usize },
    TypingStopped,
}

/// Buttons shown under the welcome message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    Queries,
    ShowCars,
}

/// Card list inside a message that an action refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTarget {
    Variants,
    Recommendations,
    Compared,
    /// Position in a variant-detail message (no carousel).
    Detail(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// A reply (or the apology text) was appended.
    Replied,
    /// Nothing was sent: blank text, input disabled, request in flight, or unknown button.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadOutcome {
    Submitted,
    /// Lead service failed; the form stays open for another try.
    Failed,
    /// Name or email missing; no request was made.
    Incomplete,
    /// No form is open.
    NotShown,
}

/// Marks a chat request in flight: typing indicator up, send disabled. Dropping it clears both,
/// so a cancelled send does not leave the widget stuck.
struct InFlight {
    flag: Arc<AtomicBool>,
    events: Option<UnboundedSender<WidgetEvent>>,
}

impl InFlight {
    fn start(flag: &Arc<AtomicBool>, events: &Option<UnboundedSender<WidgetEvent>>) -> Self {
        flag.store(true, Ordering::SeqCst);
        if let Some(tx) = events {
            let _ = tx.send(WidgetEvent::TypingStarted);
        }
        Self {
            flag: Arc::clone(flag),
            events: events.clone(),
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
        if let Some(tx) = &self.events {
            let _ = tx.send(WidgetEvent::TypingStopped);
        }
    }
}

pub struct ChatWidget {
    backends: WidgetBackends,
    session_id: String,
    transcript: Vec<Message>,
    typing_delay: Duration,
    in_flight: Arc<AtomicBool>,
    quick_actions_visible: bool,
    input_enabled: bool,
    inventory: Vec<InventoryCar>,
    lead: LeadFlow,
    draft: LeadDraft,
    panel: Panel,
    events: Option<UnboundedSender<WidgetEvent>>,
}

impl ChatWidget {
    /// Mounts a widget: fresh session id, welcome message, quick actions, input disabled.
    pub fn new(backends: WidgetBackends) -> Self {
        let session_id = Uuid::new_v4().to_string();
        info!(session_id = %session_id, "step: chat widget mounted");
        Self {
            backends,
            session_id,
            transcript: vec![Message::assistant_text(WELCOME_TEXT)],
            typing_delay: DEFAULT_TYPING_DELAY,
            in_flight: Arc::new(AtomicBool::new(false)),
            quick_actions_visible: true,
            input_enabled: false,
            inventory: Vec::new(),
            lead: LeadFlow::new(),
            draft: LeadDraft::default(),
            panel: Panel::default(),
            events: None,
        }
    }

    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = delay;
        self
    }

    pub fn with_events(mut self, events: UnboundedSender<WidgetEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn is_typing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Whether the send control is enabled.
    pub fn can_send(&self) -> bool {
        self.input_enabled && !self.is_typing()
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn quick_actions_visible(&self) -> bool {
        self.quick_actions_visible
    }

    pub fn inventory(&self) -> &[InventoryCar] {
        &self.inventory
    }

    pub fn lead_state(&self) -> &LeadState {
        self.lead.state()
    }

    pub fn lead_form_visible(&self) -> bool {
        self.lead.is_form_visible()
    }

    pub fn lead_draft(&self) -> &LeadDraft {
        &self.draft
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    fn emit(&self, event: WidgetEvent) {
        if let Some(tx) = &self.events {
            // A dropped receiver only means nobody is redrawing.
            let _ = tx.send(event);
        }
    }

    fn push(&mut self, message: Message) -> usize {
        self.transcript.push(message);
        let index = self.transcript.len() - 1;
        self.emit(WidgetEvent::MessageAppended { index });
        index
    }

    fn push_assistant_text(&mut self, text: &str) -> usize {
        self.push(Message::assistant_text(text))
    }

    /// Fetches the inventory shown by "Show Cars". Failure is reported in the transcript.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn load_inventory(&mut self) {
        match self.backends.inventory.list_models().await {
            Ok(cars) => {
                info!(count = cars.len(), "step: inventory ready");
                self.inventory = cars;
            }
            Err(e) => {
                warn!(error = %e, "step: inventory fetch failed");
                self.push_assistant_text(INVENTORY_ERROR_TEXT);
            }
        }
    }

    pub fn choose_quick_action(&mut self, action: QuickAction) {
        if !self.quick_actions_visible {
            return;
        }
        self.quick_actions_visible = false;
        match action {
            QuickAction::Queries => {
                self.input_enabled = true;
                self.push_assistant_text(QUERIES_PROMPT);
            }
            QuickAction::ShowCars => {
                let cards: Vec<VehicleVariant> =
                    self.inventory.iter().cloned().map(VehicleVariant::from).collect();
                self.push(Message::new(
                    Origin::Assistant,
                    MessageBody::VariantList {
                        variants: CardList::new(cards),
                        recommendations: CardList::new(Vec::new()),
                    },
                ));
            }
        }
    }

    /// Sends what the user typed. Ignored while the input is disabled, a request is pending, or
    /// the text is blank.
    pub async fn send_message(&mut self, text: &str) -> SendOutcome {
        if !self.input_enabled {
            return SendOutcome::Ignored;
        }
        self.ask(text).await
    }

    /// Asks about a model from a model-list message's buttons.
    pub async fn select_model(&mut self, message_index: usize, model_index: usize) -> SendOutcome {
        let model = match self.transcript.get(message_index).map(|m| &m.body) {
            Some(MessageBody::ModelList { models }) => models.get(model_index).cloned(),
            _ => None,
        };
        match model {
            Some(model) => self.ask(&model).await,
            None => SendOutcome::Ignored,
        }
    }

    /// Sends a follow-up suggestion chip of a plain-text message.
    pub async fn select_suggestion(
        &mut self,
        message_index: usize,
        suggestion_index: usize,
    ) -> SendOutcome {
        let suggestion = match self.transcript.get(message_index).map(|m| &m.body) {
            Some(MessageBody::PlainText { suggestions, .. }) => {
                suggestions.get(suggestion_index).cloned()
            }
            _ => None,
        };
        match suggestion {
            Some(s) => self.ask(&s).await,
            None => SendOutcome::Ignored,
        }
    }

    /// Appends the question, waits for the backend (and at least the typing delay), then appends
    /// exactly one assistant message.
    #[instrument(skip(self, question), fields(session_id = %self.session_id))]
    async fn ask(&mut self, question: &str) -> SendOutcome {
        let question = question.trim();
        if question.is_empty() || self.is_typing() {
            return SendOutcome::Ignored;
        }

        self.push(Message::user_text(question));

        let started = Instant::now();
        let in_flight = InFlight::start(&self.in_flight, &self.events);

        let result = self.backends.chat.ask(question, &self.session_id).await;
        tokio::time::sleep_until(started + self.typing_delay).await;

        let body = match result {
            Ok(reply) => {
                info!(kind = ?reply.kind(), "step: assistant reply");
                MessageBody::from(reply)
            }
            Err(e) => {
                warn!(error = %e, "step: chat request failed");
                MessageBody::text(CHAT_ERROR_TEXT)
            }
        };
        self.push(Message::new(Origin::Assistant, body));
        drop(in_flight);

        SendOutcome::Replied
    }

    /// Moves one carousel. Returns the new index, or None if the message has no such list.
    pub fn navigate(
        &mut self,
        message_index: usize,
        target: CardTarget,
        direction: Direction,
    ) -> Option<usize> {
        let body = &mut self.transcript.get_mut(message_index)?.body;
        let carousel = match (body, target) {
            (MessageBody::VariantList { variants, .. }, CardTarget::Variants) => {
                &mut variants.carousel
            }
            (
                MessageBody::VariantList {
                    recommendations, ..
                },
                CardTarget::Recommendations,
            ) => &mut recommendations.carousel,
            (MessageBody::Comparison { variants }, CardTarget::Compared) => &mut variants.carousel,
            _ => return None,
        };
        Some(carousel.step(direction))
    }

    /// Title of the card currently shown by `target` in a message.
    pub fn card_title(&self, message_index: usize, target: CardTarget) -> Option<String> {
        match (&self.transcript.get(message_index)?.body, target) {
            (MessageBody::VariantList { variants, .. }, CardTarget::Variants) => {
                variants.current().map(VehicleVariant::title)
            }
            (
                MessageBody::VariantList {
                    recommendations, ..
                },
                CardTarget::Recommendations,
            ) => recommendations.current().map(VehicleVariant::title),
            (MessageBody::Comparison { variants }, CardTarget::Compared) => {
                variants.current().map(|d| d.variant.title())
            }
            (MessageBody::VariantDetail { details }, CardTarget::Detail(position)) => {
                details.get(position).map(|d| d.variant.title())
            }
            _ => None,
        }
    }

    /// "Show Interest" on a vehicle: opens the lead form once. Returns whether a form message
    /// was appended.
    pub fn show_interest(&mut self, vehicle: impl Into<String>) -> bool {
        if !self.lead.show(vehicle) {
            return false;
        }
        debug_assert!(!self
            .transcript
            .iter()
            .any(|m| m.kind() == MessageKind::LeadForm));
        self.push(Message::new(Origin::User, MessageBody::LeadForm));
        true
    }

    /// "Show Interest" on the card currently shown by a carousel (or a detail card).
    pub fn show_interest_in_card(&mut self, message_index: usize, target: CardTarget) -> bool {
        match self.card_title(message_index, target) {
            Some(title) => self.show_interest(title),
            None => false,
        }
    }

    pub fn set_lead_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_lead_email(&mut self, email: impl Into<String>) {
        self.draft.email = email.into();
    }

    /// Submits the open lead form.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn submit_lead(&mut self) -> LeadOutcome {
        let vehicle = match self.lead.pending_vehicle() {
            Some(v) => v.to_string(),
            None => return LeadOutcome::NotShown,
        };
        if !self.draft.is_complete() {
            return LeadOutcome::Incomplete;
        }
        let lead = Lead {
            name: self.draft.name.trim().to_string(),
            email: self.draft.email.trim().to_string(),
            car: vehicle,
        };

        match self.backends.leads.save_interest(&lead).await {
            Ok(()) => {
                info!(car = %lead.car, "step: lead submitted");
                self.push_assistant_text(&lead_confirmation(&lead.name, &lead.email, &lead.car));
                self.draft.clear();
                self.lead.mark_submitted();
                self.quick_actions_visible = true;
                self.input_enabled = false;
                LeadOutcome::Submitted
            }
            Err(e) => {
                warn!(error = %e, "step: lead submission failed");
                self.push_assistant_text(LEAD_ERROR_TEXT);
                LeadOutcome::Failed
            }
        }
    }
}
