//! Wire types of the consultation backend and the typed payloads the
//! renderers decode from them.
//!
//! Reply payloads stay as [`Value`] until a renderer needs them, so a bad
//! diagnosis or prescription shape degrades that one panel instead of
//! failing the whole reply.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use strum_macros::{AsRefStr, EnumString};
use triage_markup::value_text;

// ---------------------------------------------------------------------------
// Roles and statuses
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Receptionist,
    Patient,
    Doctor,
    Pharmacist,
    System,
    Unknown,
}

impl Role {
    pub fn from_agent_type(agent_type: &str) -> Self {
        agent_type.trim().parse().unwrap_or(Role::Unknown)
    }

    /// Glyph shown in the bubble avatar.
    pub fn avatar(self) -> &'static str {
        match self {
            Role::Receptionist => "R",
            Role::Patient => "P",
            Role::Doctor => "D",
            Role::Pharmacist => "Ph",
            Role::System => "S",
            Role::Unknown => "?",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ConsultationStatus {
    InProgress,
    PrescriptionPending,
    InfoDisplayed,
    CompletedNoPrescription,
    CompletedPrescription,
    ErrorPrescriptionRejected,
    Error,
    #[strum(default)]
    Unknown(String),
}

impl ConsultationStatus {
    /// An absent status means the consultation simply continues.
    pub fn from_reply(status: Option<&str>) -> Self {
        match status {
            None => ConsultationStatus::InProgress,
            Some(s) => s
                .parse()
                .unwrap_or_else(|_| ConsultationStatus::Unknown(s.to_string())),
        }
    }

    pub fn is_terminal(&self) -> bool {
        match self {
            ConsultationStatus::CompletedNoPrescription
            | ConsultationStatus::CompletedPrescription
            | ConsultationStatus::ErrorPrescriptionRejected
            | ConsultationStatus::Error => true,
            ConsultationStatus::InProgress
            | ConsultationStatus::PrescriptionPending
            | ConsultationStatus::InfoDisplayed
            | ConsultationStatus::Unknown(_) => false,
        }
    }
}

impl Display for ConsultationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConsultationStatus::InProgress => "in_progress",
            ConsultationStatus::PrescriptionPending => "prescription_pending",
            ConsultationStatus::InfoDisplayed => "info_displayed",
            ConsultationStatus::CompletedNoPrescription => "completed_no_prescription",
            ConsultationStatus::CompletedPrescription => "completed_prescription",
            ConsultationStatus::ErrorPrescriptionRejected => "error_prescription_rejected",
            ConsultationStatus::Error => "error",
            ConsultationStatus::Unknown(other) => other,
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Endpoint payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartReply {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub consultation_id: Option<String>,
    #[serde(default)]
    pub initial_message: Option<AgentMessage>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentMessage {
    #[serde(default)]
    pub agent_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationRequest<'a> {
    pub consultation_id: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversationReply {
    #[serde(default)]
    pub agent_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub diagnosis_info: Option<Value>,
    #[serde(default)]
    pub prescription: Option<Value>,
    #[serde(default)]
    pub interaction_log: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogSummary {
    pub consultation_id: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub modified_time: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogListReply {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub logs: Vec<LogSummary>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogDetailReply {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub logs: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Rendered payloads
// ---------------------------------------------------------------------------

/// Text taken from any JSON scalar; numbers and booleans keep their JSON
/// spelling, `null` becomes empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct LooseText(pub String);

impl From<Value> for LooseText {
    fn from(value: Value) -> Self {
        LooseText(value_text(&value))
    }
}

impl LooseText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosisInfo {
    pub condition: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub diagnostic_tests: Option<Vec<DiagnosticTest>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DiagnosticTest {
    Name(String),
    Detail(Map<String, Value>),
}

impl DiagnosticTest {
    pub fn label(&self) -> String {
        match self {
            DiagnosticTest::Name(name) => name.clone(),
            DiagnosticTest::Detail(map) => ["name", "test_name", "test"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::to_string)
                .unwrap_or_else(|| value_text(&Value::Object(map.clone()))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Prescription {
    #[serde(default, deserialize_with = "lenient_medications")]
    pub medications: Option<Vec<Medication>>,
    #[serde(default)]
    pub instructions: Option<Instructions>,
    /// Free text notes stay raw and are coerced when rendered.
    #[serde(default)]
    pub notes: Option<Value>,
    #[serde(default)]
    pub pharmacist_notes: Option<Value>,
}

/// Keeps every list entry that reads as a medication and drops the rest, so
/// one `null` or bare string does not hide the whole prescription.
fn lenient_medications<'de, D>(deserializer: D) -> Result<Option<Vec<Medication>>, D::Error>
where
    D: Deserializer<'de>,
{
    let medications = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value::<Medication>(item).ok())
                .collect(),
        ),
        _ => None,
    };
    Ok(medications)
}

impl Prescription {
    /// Medications that carry a usable name.
    pub fn named_medications(&self) -> Vec<&Medication> {
        self.medications
            .iter()
            .flatten()
            .filter(|m| m.name.as_ref().is_some_and(|n| !n.is_blank()))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        !self.named_medications().is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Medication {
    #[serde(default)]
    pub name: Option<LooseText>,
    #[serde(default)]
    pub dosage: Option<LooseText>,
    #[serde(default)]
    pub frequency: Option<LooseText>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Instructions {
    Text(String),
    Lines(Vec<LooseText>),
    /// Numbers, booleans and objects, spelled as JSON.
    Other(LooseText),
}

impl Instructions {
    pub fn joined(&self) -> String {
        match self {
            Instructions::Text(text) => text.clone(),
            Instructions::Lines(lines) => lines
                .iter()
                .map(LooseText::as_str)
                .collect::<Vec<_>>()
                .join("\n"),
            Instructions::Other(text) => text.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionEvent {
    #[serde(default)]
    pub timestamp: Option<LooseText>,
    #[serde(default)]
    pub source: Option<LooseText>,
    #[serde(default)]
    pub target: Option<LooseText>,
    #[serde(default)]
    pub action: Option<LooseText>,
    #[serde(default)]
    pub human_readable: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
}

fn text_of(value: &Option<LooseText>) -> &str {
    value.as_ref().map(LooseText::as_str).unwrap_or_default()
}

impl InteractionEvent {
    pub fn timestamp(&self) -> &str {
        text_of(&self.timestamp)
    }

    pub fn source(&self) -> &str {
        text_of(&self.source)
    }

    pub fn target(&self) -> &str {
        text_of(&self.target)
    }

    pub fn action(&self) -> &str {
        text_of(&self.action)
    }
}
