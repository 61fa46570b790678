use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "parlour", about = "A terminal client for the Petal Parlour social feed")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the access token
    Login {
        email: String,
        password: String,
    },

    /// Register a new account
    Register {
        name: String,
        email: String,
        password: String,
    },

    /// Log out and wipe stored credentials
    Logout,

    /// Browse the feed one page at a time
    Feed {
        /// Page to start from
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Print a single page and exit instead of prompting to load more
        #[arg(long)]
        no_follow: bool,
    },

    /// Show one post with its author and comments
    Post { id: String },

    /// Create a new post
    Create {
        #[arg(short, long)]
        title: Option<String>,

        /// Image URL for the post
        #[arg(short, long)]
        image: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        /// Body text
        #[arg(short = 'x', long)]
        text: Option<String>,
    },

    /// Update an existing post
    Update {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        /// Image URL for the post
        #[arg(short, long)]
        image: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        /// Body text
        #[arg(short = 'x', long)]
        text: Option<String>,
    },

    /// Delete a post
    Delete { id: String },
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub defaults: PostDefaults,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub key: String,
    pub page_size: u32,
    pub tag: String,
    pub missing_credentials: CredentialPolicy,
}

/// What to do when an operation finds no stored credentials.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CredentialPolicy {
    /// Skip the operation without telling the user.
    Silent,
    /// Fail with a user-visible error.
    Error,
}

/// Fallbacks substituted for any post field the user leaves empty.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PostDefaults {
    pub title: String,
    pub body: String,
    pub location: String,
    pub image: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://v2.api.noroff.dev".to_string(),
            key: "ea24f62e-fd86-47de-90c3-c0874ceb7d9b".to_string(),
            page_size: 12,
            tag: "petal-parlour".to_string(),
            missing_credentials: CredentialPolicy::Silent,
        }
    }
}

impl Default for PostDefaults {
    fn default() -> Self {
        Self {
            title: "Untitled Post".to_string(),
            body: "No content".to_string(),
            location: "Unknown".to_string(),
            image: "public/default-image.png".to_string(),
        }
    }
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = Self::data_dir(cli);
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // CLI overrides
        if let Some(ref base_url) = cli.base_url {
            config.api.base_url = base_url.clone();
        }

        Ok(config)
    }

    pub fn data_dir(cli: &Cli) -> PathBuf {
        cli.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .expect("Could not determine home directory")
                .join(".parlour")
        })
    }
}
