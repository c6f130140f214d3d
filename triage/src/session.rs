//! Consultation state machine.
//!
//! [`SessionController`] owns the one [`ConsultationSession`] of a page and
//! is the only thing that talks to the backend during a consultation. It
//! holds `&mut self` across every request, so a session never has two
//! requests in flight.

use crate::api::{ApiError, ConsultationBackend};
use crate::model::{ConsultationStatus, ConversationReply, Role, StartReply};
use crate::ui::ConsultationView;
use crate::ui::copy;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Active,
    Inactive,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsultationSession {
    id: Option<String>,
    state: SessionState,
}

impl ConsultationSession {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }
}

#[derive(Debug, Error)]
pub enum StartError {
    #[error("consultation already started")]
    AlreadyStarted,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("backend refused to start: {0}")]
    Refused(String),
    #[error("start reply carried no consultation id")]
    MissingId,
    #[error("start reply carried no greeting")]
    MissingGreeting,
}

impl StartError {
    /// What the error bubble says.
    fn bubble_text(&self) -> String {
        match self {
            StartError::Api(ApiError::Status {
                message: Some(message),
                ..
            })
            | StartError::Api(ApiError::Rejected(message))
            | StartError::Refused(message)
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            _ => copy::START_FAILED.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotActive,
    Blank,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Refused before any network call.
    Rejected(Rejection),
    Continued(ConsultationStatus),
    Ended(ConsultationStatus),
    /// The request failed in transit; the session stays active.
    Failed(ApiError),
}

#[derive(Debug, Default)]
pub struct SessionController {
    session: ConsultationSession,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &ConsultationSession {
        &self.session
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Opens the consultation and shows the receptionist's greeting. Any
    /// failure leaves the session inactive for good with one error bubble on
    /// screen.
    pub async fn start<B, V>(&mut self, backend: &B, view: &mut V) -> Result<(), StartError>
    where
        B: ConsultationBackend + ?Sized,
        V: ConsultationView + ?Sized,
    {
        if self.session.state != SessionState::Uninitialized {
            return Err(StartError::AlreadyStarted);
        }

        view.set_input_enabled(false);
        view.append_message(Role::Receptionist, copy::CONNECTING, true);

        let accepted = backend
            .start_consultation()
            .await
            .map_err(StartError::from)
            .and_then(accept_start);
        view.remove_last_message();

        match accepted {
            Ok((id, role, greeting)) => {
                info!(consultation_id = %id, "consultation started");
                view.append_message(role, &greeting, false);
                view.display_interaction_log(Some(&empty_log()));
                self.session = ConsultationSession {
                    id: Some(id),
                    state: SessionState::Active,
                };
                view.set_input_enabled(true);
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "consultation failed to start");
                view.append_message(Role::System, &err.bubble_text(), false);
                view.set_placeholder(copy::PLACEHOLDER_NOT_STARTED);
                self.session.state = SessionState::Inactive;
                Err(err)
            }
        }
    }

    /// Sends one patient message and renders the reply.
    pub async fn submit<B, V>(&mut self, backend: &B, view: &mut V, message: &str) -> SubmitOutcome
    where
        B: ConsultationBackend + ?Sized,
        V: ConsultationView + ?Sized,
    {
        let message = message.trim();
        let id = match (&self.session.id, self.session.state) {
            (Some(id), SessionState::Active) => id.clone(),
            _ => {
                debug!(state = ?self.session.state, "submission while not active");
                return SubmitOutcome::Rejected(Rejection::NotActive);
            }
        };
        if message.is_empty() {
            return SubmitOutcome::Rejected(Rejection::Blank);
        }

        view.append_message(Role::Patient, message, false);
        view.set_input_enabled(false);
        view.append_message(Role::System, copy::THINKING, true);

        let reply = backend.send_message(&id, message).await;
        view.remove_last_message();

        match reply {
            Ok(reply) => self.apply_reply(view, reply),
            Err(err) => {
                warn!(consultation_id = %id, error = %err, "conversation request failed");
                view.append_message(
                    Role::System,
                    &format!("{}{}", copy::REQUEST_FAILED, err.user_message()),
                    false,
                );
                view.set_input_enabled(true);
                SubmitOutcome::Failed(err)
            }
        }
    }

    fn apply_reply<V>(&mut self, view: &mut V, reply: ConversationReply) -> SubmitOutcome
    where
        V: ConsultationView + ?Sized,
    {
        let status = ConsultationStatus::from_reply(reply.status.as_deref());
        let text = reply.message.as_deref().unwrap_or_default();
        debug!(%status, "conversation reply");

        if !text.trim().is_empty() {
            let role = reply
                .agent_type
                .as_deref()
                .map(Role::from_agent_type)
                .unwrap_or(Role::System);
            view.append_message(role, text, false);
        }
        if reply.diagnosis_info.is_some() {
            view.display_diagnosis_info(reply.diagnosis_info.as_ref());
        }
        if reply.prescription.is_some() || status == ConsultationStatus::CompletedNoPrescription {
            view.display_prescription(reply.prescription.as_ref());
        }
        if let Some(events) = reply.interaction_log.as_ref() {
            view.display_interaction_log(Some(events));
        }

        match &status {
            ConsultationStatus::InProgress | ConsultationStatus::InfoDisplayed => {
                view.set_input_enabled(true);
            }
            ConsultationStatus::PrescriptionPending => {
                view.set_input_enabled(true);
                view.set_placeholder(copy::PLACEHOLDER_PRESCRIPTION);
            }
            ConsultationStatus::Unknown(raw) => {
                warn!(status = %raw, "unrecognized consultation status, continuing");
                view.set_input_enabled(true);
            }
            ConsultationStatus::CompletedNoPrescription
            | ConsultationStatus::CompletedPrescription => {
                self.close(view, text, copy::CLOSING_COMPLETED);
            }
            ConsultationStatus::ErrorPrescriptionRejected => {
                self.close(view, text, copy::CLOSING_REJECTED);
            }
            ConsultationStatus::Error => {
                self.close(view, text, copy::CLOSING_ERROR);
            }
        }

        if status.is_terminal() {
            SubmitOutcome::Ended(status)
        } else {
            SubmitOutcome::Continued(status)
        }
    }

    fn close<V>(&mut self, view: &mut V, server_text: &str, closing: &str)
    where
        V: ConsultationView + ?Sized,
    {
        info!(consultation_id = ?self.session.id, "consultation ended");
        self.session.state = SessionState::Inactive;
        view.set_input_enabled(false);
        view.set_placeholder(copy::PLACEHOLDER_ENDED);
        if !announces_end(server_text) {
            view.append_message(Role::System, closing, false);
        }
    }
}

/// True when the server's own message already says the consultation is over.
pub fn announces_end(text: &str) -> bool {
    copy::TERMINATION_MARKERS.iter().any(|m| text.contains(m))
}

fn accept_start(reply: StartReply) -> Result<(String, Role, String), StartError> {
    if reply.status.as_deref() != Some("success") {
        return Err(StartError::Refused(reply.message.unwrap_or_default()));
    }
    let id = reply
        .consultation_id
        .filter(|id| !id.trim().is_empty())
        .ok_or(StartError::MissingId)?;
    let greeting = reply.initial_message.ok_or(StartError::MissingGreeting)?;
    let text = greeting
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or(StartError::MissingGreeting)?;
    let role = greeting
        .agent_type
        .as_deref()
        .map(Role::from_agent_type)
        .unwrap_or(Role::Receptionist);
    Ok((id, role, text))
}

/// The empty trail a fresh consultation starts with.
pub fn empty_log() -> Value {
    json!([])
}
