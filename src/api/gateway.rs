//! The one door every HTTP request leaves through.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value;
use url::Url;

use crate::auth::Credentials;
use crate::error::{ClientError, ClientResult};

const API_KEY_HEADER: &str = "X-Noroff-API-Key";

pub struct Gateway {
    http: Client,
    base: Url,
}

impl Gateway {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base = Url::parse(base_url)?;
        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Issue a request and hand back the raw response. Only transport
    /// failures are errors here; status handling belongs to the caller.
    pub async fn dispatch(
        &self,
        method: Method,
        path: &str,
        auth: Option<&Credentials>,
        body: Option<&Value>,
    ) -> ClientResult<Response> {
        let url = self.base.join(path)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            request = request
                .bearer_auth(&auth.token)
                .header(API_KEY_HEADER, &auth.api_key);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    /// Issue a request and parse the JSON body. A non-2xx status becomes a
    /// `Request` error carrying the server's `message` field when the
    /// response has one.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        auth: Option<&Credentials>,
        body: Option<&Value>,
    ) -> ClientResult<Value> {
        let response = self.dispatch(method, path, auth, body).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Self::request_error(status, response).await);
        }

        Ok(response.json().await?)
    }

    async fn request_error(status: StatusCode, response: Response) -> ClientError {
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "Something went wrong".to_string());

        ClientError::Request {
            status: status.as_u16(),
            message,
        }
    }
}
