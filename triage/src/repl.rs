use crate::api::ConsultationBackend;
use crate::session::{Rejection, SessionController, SubmitOutcome};
use crate::ui::{Page, TerminalView, copy};
use anyhow::{Context, Result};
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use triage_markup::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// A line for the consultation.
    Say(String),
    Help,
    Quit,
    Snapshot(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplParseResult {
    Empty,
    Command(ReplCommand),
    UsageError(String),
}

pub fn parse_repl_input(line: &str) -> ReplParseResult {
    let line = line.trim();
    if line.is_empty() {
        return ReplParseResult::Empty;
    }
    if matches!(line, "quit" | "exit") {
        return ReplParseResult::Command(ReplCommand::Quit);
    }
    let Some(command) = line.strip_prefix('/') else {
        return ReplParseResult::Command(ReplCommand::Say(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args = parts.collect::<Vec<_>>();
    match (name, args.as_slice()) {
        ("help" | "h" | "?", _) => ReplParseResult::Command(ReplCommand::Help),
        ("quit" | "exit" | "q", _) => ReplParseResult::Command(ReplCommand::Quit),
        ("snapshot", []) => ReplParseResult::Command(ReplCommand::Snapshot(None)),
        ("snapshot", [file]) => {
            ReplParseResult::Command(ReplCommand::Snapshot(Some((*file).to_string())))
        }
        ("snapshot", _) => ReplParseResult::UsageError("Usage: /snapshot [file]".to_string()),
        _ => ReplParseResult::UsageError(format!(
            "Unknown command: '/{name}'. Type /help for available commands."
        )),
    }
}

pub fn write_snapshot(page: &Page, path: &Path) -> Result<()> {
    let html = page.render_html()?;
    fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))
}

/// Interactive consultation on the terminal. The chat page is kept in step
/// with the terminal so it can be written out as HTML at any point.
pub struct ChatRepl<'a, B: ConsultationBackend + ?Sized> {
    backend: &'a B,
    controller: SessionController,
    terminal: TerminalView<std::io::Stdout>,
    page: Page,
    snapshot: Option<PathBuf>,
}

impl<'a, B: ConsultationBackend + ?Sized> ChatRepl<'a, B> {
    pub fn new(backend: &'a B, theme: Theme, snapshot: Option<PathBuf>, show_log: bool) -> Self {
        Self {
            backend,
            controller: SessionController::new(),
            terminal: TerminalView::stdout().with_log(show_log),
            page: Page::new(theme),
            snapshot,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        println!("{}", copy::PAGE_TITLE.bright_cyan().bold());
        println!("{}\n", "Type /help for available commands".dimmed());

        let started = self
            .controller
            .start(self.backend, &mut (&mut self.terminal, &mut self.page))
            .await;
        if let Err(err) = started {
            debug!(error = %err, "start failed");
        }
        self.autosave();

        loop {
            let prompt = self
                .terminal
                .prompt()
                .unwrap_or_else(|| format!("{} ", "·".dimmed()));
            let line = match rl.readline(&prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            };

            match parse_repl_input(&line) {
                ReplParseResult::Empty => {}
                ReplParseResult::UsageError(message) => {
                    eprintln!("{} {message}", "Error:".red().bold());
                }
                ReplParseResult::Command(ReplCommand::Quit) => break,
                ReplParseResult::Command(ReplCommand::Help) => show_help(),
                ReplParseResult::Command(ReplCommand::Snapshot(file)) => {
                    let _ = rl.add_history_entry(line.as_str());
                    if let Err(err) = self.snapshot_to(file) {
                        eprintln!("{} {err:#}", "Error:".red().bold());
                    }
                }
                ReplParseResult::Command(ReplCommand::Say(text)) => {
                    let _ = rl.add_history_entry(text.as_str());
                    self.say(&text).await;
                    self.autosave();
                }
            }
        }

        println!("{}", "Exiting...".dimmed());
        Ok(())
    }

    async fn say(&mut self, text: &str) {
        let outcome = self
            .controller
            .submit(self.backend, &mut (&mut self.terminal, &mut self.page), text)
            .await;
        match outcome {
            SubmitOutcome::Rejected(Rejection::NotActive) => {
                println!("{}", self.terminal.placeholder().dimmed());
            }
            SubmitOutcome::Rejected(Rejection::Blank) => {}
            SubmitOutcome::Continued(status) | SubmitOutcome::Ended(status) => {
                debug!(%status, "turn finished");
            }
            SubmitOutcome::Failed(err) => debug!(error = %err, "turn failed"),
        }
    }

    fn autosave(&self) {
        let Some(path) = &self.snapshot else {
            return;
        };
        if let Err(err) = write_snapshot(&self.page, path) {
            eprintln!("{} {err:#}", "Error:".red().bold());
        }
    }

    fn snapshot_to(&self, file: Option<String>) -> Result<()> {
        let Some(path) = file.map(PathBuf::from).or_else(|| self.snapshot.clone()) else {
            eprintln!(
                "{} no snapshot file; use /snapshot <file> or --snapshot",
                "Error:".red().bold()
            );
            return Ok(());
        };
        write_snapshot(&self.page, &path)?;
        println!("{} {}", "Snapshot written to".dimmed(), path.display());
        Ok(())
    }
}

fn show_help() {
    println!("Available commands:");
    println!("  <text>                  - Send a reply to the consultation");
    println!("  /snapshot [file]        - Write the chat page as HTML");
    println!("  /help                   - Show this help message");
    println!("  /quit, quit, exit       - Leave the consultation");
}
