//! CLI parser, config loading and the in-chat command grammar.

use anyhow::Result;
use autoconnect_client::ServiceConfig;
use autoconnect_core::Direction;
use autoconnect_widget::{CardTarget, QuickAction};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "autoconnect")]
#[command(about = "Auto-Connect sales assistant: chat widget and crawl admin panel", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub endpoints: EndpointArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Endpoint overrides; unset flags keep the values from env (or the defaults).
#[derive(Args, Debug, Default, Clone)]
pub struct EndpointArgs {
    #[arg(long, global = true)]
    pub chat_url: Option<String>,
    #[arg(long, global = true)]
    pub inventory_url: Option<String>,
    #[arg(long, global = true)]
    pub crawl_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the chat widget in the terminal.
    Chat {
        /// Minimum time the typing indicator is shown, in milliseconds.
        #[arg(long)]
        typing_delay_ms: Option<u64>,
    },
    /// Submit a root URL to the crawler and print the summary.
    Crawl {
        #[arg(short, long, default_value = "")]
        url: String,
    },
    /// List the vehicle inventory.
    Models,
}

/// Load ServiceConfig from environment, then apply command-line overrides and validate.
pub fn load_config(endpoints: &EndpointArgs) -> Result<ServiceConfig> {
    let mut config = ServiceConfig::from_env()?;
    if let Some(url) = &endpoints.chat_url {
        config.chat_api_url = url.clone();
    }
    if let Some(url) = &endpoints.inventory_url {
        config.inventory_api_url = url.clone();
    }
    if let Some(url) = &endpoints.crawl_url {
        config.crawl_api_url = url.clone();
    }
    config.validate()?;
    Ok(config)
}

/// One line typed into the chat session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Send(String),
    QuickAction(QuickAction),
    SelectModel { message: usize, model: usize },
    SelectSuggestion { message: usize, suggestion: usize },
    Navigate { message: usize, target: CardTarget, direction: Direction },
    ShowInterest { message: usize, target: CardTarget },
    LeadName(String),
    LeadEmail(String),
    SubmitLead,
    Resize { width: u32, height: u32 },
    Drag { dx: i32, dy: i32 },
    Open,
    Close,
    Help,
    Quit,
    /// A `/command` that did not parse; carries the usage hint.
    Invalid(&'static str),
}

pub const HELP: &str = "\
/queries | /cars                      quick actions
/model <msg#> <n>                     ask about the n-th model button
/suggest <msg#> <n>                   send the n-th follow-up suggestion
/next|/prev <msg#> [variants|recommended|compare]
/interest <msg#> [variants|recommended|compare|detail <n>]
/name <text> | /email <text> | /submit  lead form
/open | /close | /resize <w> <h> | /drag <dx> <dy>  panel
/help | /quit
anything else is sent as a question";

fn parse_target(words: &[&str]) -> Option<CardTarget> {
    match words {
        [] | ["variants"] => Some(CardTarget::Variants),
        ["recommended"] => Some(CardTarget::Recommendations),
        ["compare"] => Some(CardTarget::Compared),
        ["detail", n] => n.parse::<usize>().ok()?.checked_sub(1).map(CardTarget::Detail),
        _ => None,
    }
}

/// 1-based button number to index.
fn parse_position(word: &str) -> Option<usize> {
    word.parse::<usize>().ok()?.checked_sub(1)
}

impl ChatCommand {
    pub fn parse(line: &str) -> ChatCommand {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return ChatCommand::Send(line.to_string());
        };
        let words: Vec<&str> = rest.split_whitespace().collect();
        let arg_text = |skip: usize| -> String {
            rest.splitn(skip + 1, char::is_whitespace)
                .nth(skip)
                .unwrap_or("")
                .trim()
                .to_string()
        };
        match words.as_slice() {
            ["queries"] => ChatCommand::QuickAction(QuickAction::Queries),
            ["cars"] => ChatCommand::QuickAction(QuickAction::ShowCars),
            ["model", m, n] => match (m.parse(), parse_position(n)) {
                (Ok(message), Some(model)) => ChatCommand::SelectModel { message, model },
                _ => ChatCommand::Invalid("/model <msg#> <n>"),
            },
            ["suggest", m, n] => match (m.parse(), parse_position(n)) {
                (Ok(message), Some(suggestion)) => ChatCommand::SelectSuggestion {
                    message,
                    suggestion,
                },
                _ => ChatCommand::Invalid("/suggest <msg#> <n>"),
            },
            [verb @ ("next" | "prev"), m, target @ ..] => {
                let direction = if *verb == "next" {
                    Direction::Next
                } else {
                    Direction::Previous
                };
                match (m.parse(), parse_target(target)) {
                    (Ok(message), Some(target)) => ChatCommand::Navigate {
                        message,
                        target,
                        direction,
                    },
                    _ => ChatCommand::Invalid("/next|/prev <msg#> [variants|recommended|compare]"),
                }
            }
            ["interest", m, target @ ..] => match (m.parse(), parse_target(target)) {
                (Ok(message), Some(target)) => ChatCommand::ShowInterest { message, target },
                _ => ChatCommand::Invalid("/interest <msg#> [variants|recommended|compare|detail <n>]"),
            },
            ["name", ..] if words.len() > 1 => ChatCommand::LeadName(arg_text(1)),
            ["email", ..] if words.len() > 1 => ChatCommand::LeadEmail(arg_text(1)),
            ["submit"] => ChatCommand::SubmitLead,
            ["resize", w, h] => match (w.parse(), h.parse()) {
                (Ok(width), Ok(height)) => ChatCommand::Resize { width, height },
                _ => ChatCommand::Invalid("/resize <w> <h>"),
            },
            ["drag", x, y] => match (x.parse(), y.parse()) {
                (Ok(dx), Ok(dy)) => ChatCommand::Drag { dx, dy },
                _ => ChatCommand::Invalid("/drag <dx> <dy>"),
            },
            ["open"] => ChatCommand::Open,
            ["close"] => ChatCommand::Close,
            ["help"] => ChatCommand::Help,
            ["quit"] | ["exit"] => ChatCommand::Quit,
            _ => ChatCommand::Invalid("unknown command, try /help"),
        }
    }
}
