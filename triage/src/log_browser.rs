use crate::api::{ApiError, LogArchive};
use crate::model::LogSummary;
use crate::ui::LogsPage;
use serde_json::Value;
use tracing::{info, warn};
use triage_markup::Theme;

/// Drives a [`LogsPage`] from the log archive endpoints. Failures are shown
/// on the page and handed back to the caller.
pub struct LogBrowser<'a, A: LogArchive + ?Sized> {
    archive: &'a A,
    page: LogsPage,
    logs: Vec<LogSummary>,
}

impl<'a, A: LogArchive + ?Sized> LogBrowser<'a, A> {
    pub fn new(archive: &'a A, theme: Theme) -> Self {
        Self {
            archive,
            page: LogsPage::new(theme),
            logs: Vec::new(),
        }
    }

    pub fn page(&self) -> &LogsPage {
        &self.page
    }

    /// Summaries from the last successful refresh, newest first.
    pub fn logs(&self) -> &[LogSummary] {
        &self.logs
    }

    pub async fn refresh(&mut self) -> Result<&[LogSummary], ApiError> {
        match self.archive.list_logs().await {
            Ok(mut logs) => {
                info!(count = logs.len(), "interaction logs listed");
                crate::ui::logs_page::sort_newest_first(&mut logs);
                self.page.show_list(logs.clone());
                self.logs = logs;
                Ok(&self.logs)
            }
            Err(err) => {
                warn!(error = %err, "listing interaction logs failed");
                self.page.show_list_error(&err.user_message());
                Err(err)
            }
        }
    }

    /// Loads one trail into the detail area and returns its raw events.
    pub async fn open(&mut self, consultation_id: &str) -> Result<Value, ApiError> {
        match self.archive.fetch_log(consultation_id).await {
            Ok(events) => {
                info!(consultation_id, "interaction log loaded");
                self.page.show_detail(consultation_id, Some(&events));
                Ok(events)
            }
            Err(err) => {
                warn!(consultation_id, error = %err, "loading interaction log failed");
                self.page
                    .show_detail_error(consultation_id, &err.user_message());
                Err(err)
            }
        }
    }
}
