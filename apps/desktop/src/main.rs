use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use client_core::{load_settings, ConversationSession, QuickAction, WebhookResponder};
use shared::domain::{ChatMessage, MessageId};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Terminal front end for the mock phone chat")]
struct Args {
    /// Overrides the responder webhook from settings.
    #[arg(long)]
    webhook_url: Option<String>,
    /// Settings file to load instead of ./mock_chat.toml.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    Help,
    Quick(QuickAction),
    Send(String),
}

fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    match trimmed {
        "/quit" | "/exit" => Input::Quit,
        "/help" => Input::Help,
        _ => match QuickAction::from_command(trimmed) {
            Some(action) => Input::Quick(action),
            None => Input::Send(line.to_string()),
        },
    }
}

fn format_line(message: &ChatMessage) -> String {
    let time = message.created_at.with_timezone(&Local).format("%H:%M");
    format!("[{time}] {}: {}", message.sender.transcript_tag(), message.text)
}

fn print_help() {
    println!("Type a message and press Enter to send it.");
    println!("Quick actions: /start /bump1 /bump2 /bump3. /quit exits.");
}

/// Prints messages newer than `last_printed`, returning the newest id shown.
fn print_new_messages(
    session: &ConversationSession,
    last_printed: Option<MessageId>,
) -> Option<MessageId> {
    let mut newest = last_printed;
    for message in session
        .messages()
        .iter()
        .filter(|m| last_printed.map_or(true, |last| m.id > last))
    {
        println!("{}", format_line(message));
        newest = Some(message.id);
    }
    newest
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings =
        load_settings(args.config.as_deref()).context("failed to load chat settings")?;
    if let Some(webhook_url) = args.webhook_url {
        settings = settings
            .with_webhook_url(webhook_url)
            .context("invalid --webhook-url")?;
    }
    tracing::info!(webhook_url = %settings.webhook_url, "starting terminal chat");

    let responder = WebhookResponder::new(settings.webhook_url.clone());
    let mut session = ConversationSession::new();
    let mut last_printed = None;

    print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match parse_input(&line) {
            Input::Quit => break,
            Input::Help => print_help(),
            Input::Quick(action) => {
                if action.resets_transcript() {
                    println!("--- conversation restarted ---");
                }
                session.apply_quick_action(action);
            }
            Input::Send(text) => {
                if text.trim().is_empty() {
                    continue;
                }
                println!("...");
                if let Err(err) = session.send_user_message(&text, &responder).await {
                    tracing::debug!(code = ?err.code(), "send did not produce a reply");
                }
                if let Some(banner) = session.last_error() {
                    eprintln!("Error! {banner}");
                }
            }
        }
        last_printed = print_new_messages(&session, last_printed);
    }

    Ok(())
}
