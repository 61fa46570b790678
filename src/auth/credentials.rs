use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ClientResult;

const CREDENTIALS_FILE: &str = "credentials.json";

/// Token and API key pair required on every post request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredCredentials {
    token: Option<String>,
    api_key: String,
}

/// Flat key/value credential storage backed by a JSON file in the data
/// directory. The bearer token is written on login and wiped on logout;
/// the API key is seeded from configuration.
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    stored: StoredCredentials,
}

impl CredentialStore {
    /// Load existing credentials or create the file with no token and the
    /// configured API key.
    pub fn load_or_create(data_dir: &Path, api_key: &str) -> ClientResult<Self> {
        let path = data_dir.join(CREDENTIALS_FILE);

        if path.exists() {
            let json = fs::read_to_string(&path)?;
            let mut stored: StoredCredentials = serde_json::from_str(&json)?;
            // A cleared store keeps its file; reseed the key so a later
            // login works without manual surgery.
            if stored.api_key.is_empty() {
                stored.api_key = api_key.to_string();
            }
            Ok(Self { path, stored })
        } else {
            let stored = StoredCredentials {
                token: None,
                api_key: api_key.to_string(),
            };
            fs::write(&path, serde_json::to_string_pretty(&stored)?)?;
            tracing::info!("Created credential store: {}", path.display());
            Ok(Self { path, stored })
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.stored.token.as_deref()
    }

    pub fn set_token(&mut self, token: &str) -> ClientResult<()> {
        self.stored.token = Some(token.to_string());
        self.save()
    }

    pub fn api_key(&self) -> &str {
        &self.stored.api_key
    }

    pub fn set_api_key(&mut self, api_key: &str) -> ClientResult<()> {
        self.stored.api_key = api_key.to_string();
        self.save()
    }

    /// Both values, or nothing. Operations must not fire with half a pair.
    pub fn credentials(&self) -> Option<Credentials> {
        let token = self.stored.token.as_deref()?;
        if token.is_empty() || self.stored.api_key.is_empty() {
            return None;
        }
        Some(Credentials {
            token: token.to_string(),
            api_key: self.stored.api_key.clone(),
        })
    }

    /// Remove the token and the stored key (logout).
    pub fn clear(&mut self) -> ClientResult<()> {
        self.stored = StoredCredentials::default();
        self.save()
    }

    fn save(&self) -> ClientResult<()> {
        fs::write(&self.path, serde_json::to_string_pretty(&self.stored)?)?;
        Ok(())
    }
}
