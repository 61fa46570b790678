//! Login, registration, and logout against the auth endpoints.

use reqwest::Method;
use serde_json::{json, Value};

use crate::api::Gateway;
use crate::auth::credentials::CredentialStore;
use crate::auth::validate;
use crate::error::{ClientError, ClientResult};

/// Log in and persist the returned access token.
pub async fn login(
    gateway: &Gateway,
    store: &mut CredentialStore,
    api_key: &str,
    email: &str,
    password: &str,
) -> ClientResult<()> {
    let email = email.trim();
    let password = password.trim();
    validate::login(email, password)?;

    let body = json!({ "email": email, "password": password });
    let response = gateway.send(Method::POST, "auth/login", None, Some(&body)).await?;

    let token = access_token(&response).ok_or_else(|| {
        ClientError::Validation("No access token returned.".into())
    })?;

    store.set_token(token)?;
    if store.api_key().is_empty() {
        store.set_api_key(api_key)?;
    }
    tracing::info!("Logged in as {}", email);
    Ok(())
}

/// Register a new account. The caller logs in separately afterwards.
pub async fn register(
    gateway: &Gateway,
    name: &str,
    email: &str,
    password: &str,
) -> ClientResult<()> {
    let name = name.trim();
    let email = email.trim();
    let password = password.trim();
    validate::registration(name, email, password)?;

    let body = json!({ "name": name, "email": email, "password": password });
    gateway
        .send(Method::POST, "auth/register", None, Some(&body))
        .await?;
    tracing::info!("Registered {}", name);
    Ok(())
}

/// Log out: wipe the stored token and key.
pub fn logout(store: &mut CredentialStore) -> ClientResult<()> {
    store.clear()?;
    tracing::info!("Logged out");
    Ok(())
}

/// The token lands under `data.accessToken` or at the top level depending
/// on the endpoint version; check both.
fn access_token(response: &Value) -> Option<&str> {
    response
        .pointer("/data/accessToken")
        .and_then(Value::as_str)
        .or_else(|| response.get("accessToken").and_then(Value::as_str))
}
