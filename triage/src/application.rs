use crate::cli::{
    ChatArgs, Cli, Commands, ConfigCommands, LogsCommands, LogsListArgs, LogsShowArgs,
};
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::Level;
use triage::api::HttpBackend;
use triage::config::{ConfigStore, Overrides, Settings};
use triage::log_browser::LogBrowser;
use triage::repl::ChatRepl;
use triage::ui::interaction_log::{self, LogLine, LogRender};
use triage::ui::logs_page::{format_modified, human_size};
use triage::ui::{LogsPage, copy};

pub async fn run(cli: Cli) -> Result<()> {
    let store = ConfigStore::new();
    let file = store
        .load_merged(cli.config.as_deref())
        .context("failed to load configuration")?;
    let overrides = Overrides {
        base_url: cli.base_url,
        timeout_secs: cli.timeout,
        verbose: cli.verbose,
    };
    let settings = Settings::resolve(file, &overrides).context("invalid configuration")?;
    init_tracing(settings.log_level);

    match cli.command {
        Commands::Chat(args) => cmd_chat(&settings, args).await,
        Commands::Logs { command } => match command {
            LogsCommands::List(args) => cmd_logs_list(&settings, args).await,
            LogsCommands::Show(args) => cmd_logs_show(&settings, args).await,
        },
        Commands::Config {
            command: ConfigCommands::Show,
        } => {
            settings.display();
            Ok(())
        }
    }
}

fn init_tracing(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn cmd_chat(settings: &Settings, args: ChatArgs) -> Result<()> {
    let backend = HttpBackend::new(settings).context("failed to set up backend client")?;
    ChatRepl::new(&backend, settings.theme, args.snapshot, args.show_log)
        .run()
        .await
}

async fn cmd_logs_list(settings: &Settings, args: LogsListArgs) -> Result<()> {
    let backend = HttpBackend::new(settings).context("failed to set up backend client")?;
    let mut browser = LogBrowser::new(&backend, settings.theme);
    let listed = browser.refresh().await.map(<[_]>::to_vec);
    write_page(browser.page(), args.html.as_deref())?;

    let logs = listed.context("failed to list interaction logs")?;
    if logs.is_empty() {
        println!("{}", copy::LOG_LIST_EMPTY.dimmed());
        return Ok(());
    }

    println!(
        "{:<40} {:<20} {:>10}",
        copy::LOG_ID_COLUMN.bold(),
        copy::LOG_TIME_COLUMN.bold(),
        copy::LOG_SIZE_COLUMN.bold()
    );
    for log in logs {
        let modified = format_modified(log.modified_time.as_deref().unwrap_or_default());
        let size = log.size.map(human_size).unwrap_or_default();
        println!(
            "{:<40} {:<20} {:>10}",
            log.consultation_id.bright_blue(),
            modified,
            size.dimmed()
        );
    }
    Ok(())
}

async fn cmd_logs_show(settings: &Settings, args: LogsShowArgs) -> Result<()> {
    let backend = HttpBackend::new(settings).context("failed to set up backend client")?;
    let mut browser = LogBrowser::new(&backend, settings.theme);

    // The list only matters for the HTML page.
    if args.html.is_some() {
        let _ = browser.refresh().await;
    }
    let opened = browser.open(&args.consultation_id).await;
    write_page(browser.page(), args.html.as_deref())?;
    let events =
        opened.with_context(|| format!("failed to load log '{}'", args.consultation_id))?;

    println!("{}", args.consultation_id.bright_cyan().bold());
    print_log(Some(&events));
    Ok(())
}

fn write_page(page: &LogsPage, path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let html = page.render_html()?;
    fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
    println!("{} {}", "Page written to".dimmed(), path.display());
    Ok(())
}

fn print_log(events: Option<&Value>) {
    match interaction_log::prepare(events) {
        LogRender::Placeholder(text) => println!("{}", text.dimmed()),
        LogRender::Lines(lines) => {
            for line in lines {
                match line {
                    LogLine::Entry { time, text } => println!("{} {text}", time.dimmed()),
                    LogLine::Broken => println!("{}", copy::LOG_ENTRY_BROKEN.red()),
                }
            }
        }
    }
}
