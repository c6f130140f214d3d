use crate::model::{DiagnosisInfo, Medication, Prescription};
use crate::ui::copy;
use serde_json::Value;
use tracing::warn;
use triage_markup::prelude::*;

pub const HIDDEN_CLASS: &str = "hidden";
pub const DIAGNOSIS_CLASS: &str = "diagnosis-block";
pub const PRESCRIPTION_CLASS: &str = "prescription-block";
pub const NO_PRESCRIPTION_CLASS: &str = "no-prescription";

#[derive(Debug, Clone)]
pub enum DiagnosisOutcome {
    Full(DiagnosisInfo),
    /// The payload named a condition but something else had the wrong shape.
    ConditionOnly(String),
}

pub fn decode_diagnosis(value: Option<&Value>) -> Option<DiagnosisOutcome> {
    let value = value?;
    let condition = value
        .get("condition")
        .and_then(Value::as_str)
        .filter(|c| !c.trim().is_empty())?;

    match serde_json::from_value::<DiagnosisInfo>(value.clone()) {
        Ok(info) => Some(DiagnosisOutcome::Full(info)),
        Err(err) => {
            warn!(error = %err, "diagnosis payload partially unreadable");
            Some(DiagnosisOutcome::ConditionOnly(condition.to_string()))
        }
    }
}

/// A prescription worth showing, i.e. one with at least one named medication.
pub fn decode_prescription(value: Option<&Value>) -> Option<Prescription> {
    let value = value?;
    match serde_json::from_value::<Prescription>(value.clone()) {
        Ok(prescription) if prescription.is_valid() => Some(prescription),
        Ok(_) => None,
        Err(err) => {
            warn!(error = %err, "prescription payload unreadable");
            None
        }
    }
}

pub fn medication_line(med: &Medication) -> (String, String, String) {
    let field = |v: &Option<crate::model::LooseText>| {
        v.as_ref()
            .filter(|t| !t.is_blank())
            .map(|t| t.as_str().to_string())
            .unwrap_or_else(|| copy::AS_DIRECTED.to_string())
    };
    let name = med
        .name
        .as_ref()
        .map(|n| n.as_str().to_string())
        .unwrap_or_default();
    (name, field(&med.dosage), field(&med.frequency))
}

fn labelled(class: &str, label: &str, value_html: String) -> Element {
    p().class(class)
        .child(strong().text(label))
        .child(span().raw_html(&value_html))
}

pub fn diagnosis_block(info: &DiagnosisInfo) -> Element {
    let tests = info
        .diagnostic_tests
        .iter()
        .flatten()
        .map(|t| t.label())
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>();

    div()
        .class(DIAGNOSIS_CLASS)
        .child(h3().text(copy::DIAGNOSIS_HEADING))
        .child(labelled(
            "condition",
            copy::CONDITION_LABEL,
            escape_multiline(&info.condition),
        ))
        .child_opt(
            info.severity
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(|s| labelled("severity", copy::SEVERITY_LABEL, escape_multiline(s))),
        )
        .child_opt(
            info.explanation
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(|s| labelled("explanation", copy::EXPLANATION_LABEL, escape_multiline(s))),
        )
        .child_opt((!tests.is_empty()).then(|| {
            labelled(
                "diagnostic-tests",
                copy::TESTS_LABEL,
                escape_html(&tests.join("、")),
            )
        }))
}

pub fn condition_only_block(condition: &str) -> Element {
    div()
        .class(DIAGNOSIS_CLASS)
        .child(h3().text(copy::DIAGNOSIS_HEADING))
        .child(labelled(
            "condition",
            copy::CONDITION_LABEL,
            escape_multiline(condition),
        ))
}

pub fn prescription_block(prescription: &Prescription) -> Element {
    let rows = prescription.named_medications().into_iter().map(|med| {
        let (name, dosage, frequency) = medication_line(med);
        li().class("medication")
            .child(strong().class("medication-name").text(&name))
            .child(span().class("medication-dosage").text(&dosage))
            .child(span().class("medication-frequency").text(&frequency))
    });

    let instructions = prescription
        .instructions
        .as_ref()
        .map(|i| i.joined())
        .filter(|i| !i.trim().is_empty());

    let note = |class: &str, label: &str, value: Option<&Value>| {
        value
            .filter(|v| !value_text(v).trim().is_empty())
            .map(|v| labelled(class, label, line_breaks(&sanitize_opt(Some(v)))))
    };

    div()
        .class(PRESCRIPTION_CLASS)
        .child(h3().text(copy::PRESCRIPTION_HEADING))
        .child(ul().class("medication-list").children_from(rows))
        .child_opt(
            instructions
                .map(|i| labelled("instructions", copy::INSTRUCTIONS_LABEL, escape_multiline(&i))),
        )
        .child_opt(note(
            "notes",
            copy::NOTES_LABEL,
            prescription.notes.as_ref(),
        ))
        .child_opt(note(
            "pharmacist-notes",
            copy::PHARMACIST_NOTES_LABEL,
            prescription.pharmacist_notes.as_ref(),
        ))
}

/// Clears and rewrites the result panel. Returns false when the payload has
/// no usable condition and the panel was left alone.
pub fn display_diagnosis_info(panel: &mut Element, info: Option<&Value>) -> bool {
    let block = match decode_diagnosis(info) {
        Some(DiagnosisOutcome::Full(info)) => diagnosis_block(&info),
        Some(DiagnosisOutcome::ConditionOnly(condition)) => condition_only_block(&condition),
        None => return false,
    };

    panel.clear();
    panel.push(block);
    panel.remove_class(HIDDEN_CLASS);
    true
}

/// Replaces the prescription block. Without a named medication only the
/// "no valid prescription" notice is added, and only once. Either way the
/// panel is shown.
pub fn display_prescription(panel: &mut Element, prescription: Option<&Value>) -> bool {
    let Some(prescription) = decode_prescription(prescription) else {
        if !panel.text_content().contains(copy::NO_PRESCRIPTION) {
            panel.push(p().class(NO_PRESCRIPTION_CLASS).text(copy::NO_PRESCRIPTION));
        }
        panel.remove_class(HIDDEN_CLASS);
        return false;
    };

    panel.retain(|c| !c.has_class(PRESCRIPTION_CLASS) && !c.has_class(NO_PRESCRIPTION_CLASS));
    panel.push(prescription_block(&prescription));
    panel.remove_class(HIDDEN_CLASS);
    true
}
