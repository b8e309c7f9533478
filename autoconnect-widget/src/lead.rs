//! Lead-capture flow: hidden → shown → submitted.

/// Where the lead form is in its lifecycle. Submitted is terminal for the widget session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LeadState {
    #[default]
    Hidden,
    Shown { vehicle: String },
    Submitted { vehicle: String },
}

/// State machine behind "Show Interest" and the lead form.
#[derive(Debug, Clone, Default)]
pub struct LeadFlow {
    state: LeadState,
}

impl LeadFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LeadState {
        &self.state
    }

    /// Hidden → Shown for `vehicle`. Returns false (and changes nothing) in any other state.
    pub fn show(&mut self, vehicle: impl Into<String>) -> bool {
        match self.state {
            LeadState::Hidden => {
                self.state = LeadState::Shown {
                    vehicle: vehicle.into(),
                };
                true
            }
            LeadState::Shown { .. } | LeadState::Submitted { .. } => false,
        }
    }

    /// Vehicle the open form is for, if the form is shown.
    pub fn pending_vehicle(&self) -> Option<&str> {
        match &self.state {
            LeadState::Shown { vehicle } => Some(vehicle),
            _ => None,
        }
    }

    pub fn is_form_visible(&self) -> bool {
        matches!(self.state, LeadState::Shown { .. })
    }

    /// Shown → Submitted. Only called after the lead service accepted the submission.
    pub fn mark_submitted(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            LeadState::Shown { vehicle } => {
                self.state = LeadState::Submitted { vehicle };
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }
}

/// Name and email typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadDraft {
    pub name: String,
    pub email: String,
}

impl LeadDraft {
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
    }

    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }
}
