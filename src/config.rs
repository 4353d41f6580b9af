use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Url;

use crate::policy::NamePolicy;

const TELEGRAM_API_ROOT: &str = "https://api.telegram.org";

#[derive(Debug, Parser)]
#[command(name = "joinguard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Removes newly joined chat members whose names are too long", long_about = None)]
pub struct Cli {
    /// The authentication token for the bot
    #[arg(long, default_value = "")]
    pub bot_token: String,

    /// The ID of the chat to monitor by the bot
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub chat_id: String,

    /// The limit for the user name
    #[arg(long, default_value_t = 30, allow_negative_numbers = true)]
    pub user_name_limit: i64,
}

/// Endpoint root and target chat used for every outbound call
#[derive(Debug, Clone)]
pub struct BotSession {
    pub base_url: Url,
    pub chat_id: String,
}

impl BotSession {
    /// Resolve a Bot API method (e.g. `getUpdates`) against the base URL.
    pub fn endpoint(&self, method: &str) -> Result<Url> {
        self.base_url
            .join(method)
            .with_context(|| format!("Invalid Bot API method: {}", method))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub session: BotSession,
    pub policy: NamePolicy,
}

impl Cli {
    pub fn into_config(self) -> Result<Config> {
        if self.bot_token.is_empty() {
            anyhow::bail!("bot-token needs to be specified");
        }
        if self.chat_id.is_empty() {
            anyhow::bail!("chat-id needs to be specified");
        }
        if self.user_name_limit < 0 {
            anyhow::bail!("user-name-limit needs to be non-negative");
        }
        let limit = usize::try_from(self.user_name_limit)
            .context("user-name-limit does not fit this platform")?;

        let base_url = Url::parse(&format!("{}/bot{}/", TELEGRAM_API_ROOT, self.bot_token))
            .context("Failed to build Bot API base URL")?;

        Ok(Config {
            session: BotSession {
                base_url,
                chat_id: self.chat_id,
            },
            policy: NamePolicy::new(limit),
        })
    }
}
