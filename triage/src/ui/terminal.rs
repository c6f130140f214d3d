use crate::model::Role;
use crate::ui::copy;
use crate::ui::interaction_log::{self, LogLine, LogRender};
use crate::ui::results::{self, DiagnosisOutcome};
use crate::ui::view::ConsultationView;
use colored::{ColoredString, Colorize};
use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use serde_json::Value;
use std::io::Write;
use triage_markup::value_text;

/// Prints the consultation to a terminal.
///
/// A loading placeholder is written without a trailing newline so it can be
/// wiped in place once the reply arrives.
pub struct TerminalView<W: Write> {
    out: W,
    loading: bool,
    enabled: bool,
    placeholder: String,
    notice_shown: bool,
    show_log: bool,
}

impl TerminalView<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            loading: false,
            enabled: false,
            placeholder: copy::PLACEHOLDER_WAIT.to_string(),
            notice_shown: false,
            show_log: false,
        }
    }

    /// Also print the interaction log after every reply.
    pub fn with_log(mut self, show_log: bool) -> Self {
        self.show_log = show_log;
        self
    }

    pub fn is_input_enabled(&self) -> bool {
        self.enabled
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Prompt for the next line, or `None` while input is disabled.
    pub fn prompt(&self) -> Option<String> {
        self.enabled.then(|| format!("{} ", "›".bold()))
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn clear_loading(&mut self) {
        if !self.loading {
            return;
        }
        let _ = queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine));
        let _ = self.out.flush();
        self.loading = false;
    }

    fn line(&mut self, text: impl std::fmt::Display) {
        self.clear_loading();
        let _ = writeln!(self.out, "{text}");
    }
}

fn speaker(role: Role) -> ColoredString {
    let label = format!("[{}]", role.avatar());
    match role {
        Role::Receptionist => label.cyan().bold(),
        Role::Patient => label.green().bold(),
        Role::Doctor => label.blue().bold(),
        Role::Pharmacist => label.magenta().bold(),
        Role::System => label.yellow().bold(),
        Role::Unknown => label.dimmed(),
    }
}

impl<W: Write> ConsultationView for TerminalView<W> {
    fn append_message(&mut self, role: Role, message: &str, is_loading: bool) {
        self.clear_loading();
        if is_loading {
            let _ = write!(self.out, "{} {}", speaker(role), message.dimmed().italic());
            let _ = self.out.flush();
            self.loading = true;
            return;
        }

        let mut lines = message.lines();
        let first = lines.next().unwrap_or_default();
        self.line(format_args!("{} {first}", speaker(role)));
        for rest in lines {
            self.line(format_args!("    {rest}"));
        }
    }

    fn remove_last_message(&mut self) {
        self.clear_loading();
    }

    fn display_diagnosis_info(&mut self, info: Option<&Value>) {
        let (condition, severity, explanation, tests) = match results::decode_diagnosis(info) {
            Some(DiagnosisOutcome::Full(info)) => {
                let tests = info
                    .diagnostic_tests
                    .iter()
                    .flatten()
                    .map(|t| t.label())
                    .filter(|t| !t.trim().is_empty())
                    .collect::<Vec<_>>();
                (info.condition, info.severity, info.explanation, tests)
            }
            Some(DiagnosisOutcome::ConditionOnly(condition)) => {
                (condition, None, None, Vec::new())
            }
            None => return,
        };

        self.line(format_args!("\n{}", copy::DIAGNOSIS_HEADING.bold().underline()));
        self.line(format_args!("  {}{condition}", copy::CONDITION_LABEL.bold()));
        if let Some(severity) = severity.filter(|s| !s.trim().is_empty()) {
            self.line(format_args!("  {}{severity}", copy::SEVERITY_LABEL.bold()));
        }
        if let Some(explanation) = explanation.filter(|s| !s.trim().is_empty()) {
            self.line(format_args!("  {}{explanation}", copy::EXPLANATION_LABEL.bold()));
        }
        if !tests.is_empty() {
            self.line(format_args!("  {}{}", copy::TESTS_LABEL.bold(), tests.join("、")));
        }
    }

    fn display_prescription(&mut self, prescription: Option<&Value>) {
        let Some(prescription) = results::decode_prescription(prescription) else {
            if !self.notice_shown {
                self.line(copy::NO_PRESCRIPTION.dimmed());
                self.notice_shown = true;
            }
            return;
        };

        self.line(format_args!("\n{}", copy::PRESCRIPTION_HEADING.bold().underline()));
        for med in prescription.named_medications() {
            let (name, dosage, frequency) = results::medication_line(med);
            self.line(format_args!("  • {} {dosage} {frequency}", name.bold()));
        }
        if let Some(instructions) = prescription.instructions.as_ref().map(|i| i.joined()) {
            if !instructions.trim().is_empty() {
                self.line(format_args!("  {}{instructions}", copy::INSTRUCTIONS_LABEL.bold()));
            }
        }
        let notes = [
            (copy::NOTES_LABEL, prescription.notes.as_ref()),
            (copy::PHARMACIST_NOTES_LABEL, prescription.pharmacist_notes.as_ref()),
        ];
        for (label, value) in notes {
            let text = value.map(value_text).unwrap_or_default();
            if !text.trim().is_empty() {
                self.line(format_args!("  {}{text}", label.bold()));
            }
        }
    }

    fn display_interaction_log(&mut self, events: Option<&Value>) {
        if !self.show_log {
            return;
        }
        match interaction_log::prepare(events) {
            LogRender::Placeholder(text) => self.line(text.dimmed()),
            LogRender::Lines(lines) => {
                self.line(copy::LOG_HEADING.dimmed().underline());
                for line in lines {
                    match line {
                        LogLine::Entry { time, text } => {
                            self.line(format_args!("  {} {}", time.dimmed(), text.dimmed()))
                        }
                        LogLine::Broken => {
                            self.line(format_args!("  {}", copy::LOG_ENTRY_BROKEN.red()))
                        }
                    }
                }
            }
        }
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.placeholder = if enabled {
            copy::PLACEHOLDER_READY
        } else {
            copy::PLACEHOLDER_WAIT
        }
        .to_string();
    }

    /// Only hints that differ from the plain ready/wait prompts are printed.
    fn set_placeholder(&mut self, text: &str) {
        let routine = [copy::PLACEHOLDER_READY, copy::PLACEHOLDER_WAIT];
        if text != self.placeholder && !routine.contains(&text) {
            self.line(text.dimmed());
        }
        self.placeholder = text.to_string();
    }
}
