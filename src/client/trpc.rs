//! tRPC client core
//!
//! Inputs are stripped of `OMIT` entries, wrapped in a superjson envelope and
//! sent either as the `input` query parameter (queries) or as the JSON body
//! (mutations). Responses are unwrapped from `result.data` and decoded.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::native::Native;
use crate::pagination::{paginate_stream, CursorPaginator, PagePaginator};
use crate::session::{Identity, SESSION_PATH};
use crate::superjson;
use crate::template::strip_omitted;
use crate::types::{JsonObject, JsonValue};
use futures::Stream;
use reqwest::Response;
use tracing::debug;

/// Client for the site's tRPC endpoints
#[derive(Debug, Clone)]
pub struct TrpcClient {
    http: HttpClient,
    identity: Option<Identity>,
}

impl TrpcClient {
    /// Create a client from a configuration; no identity is loaded yet
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            http: HttpClient::with_config(config.http_config())?,
            identity: None,
        })
    }

    /// Create a client without any login
    pub fn anonymous() -> Result<Self> {
        Self::new(&ClientConfig::default())
    }

    /// Attach a known identity, e.g. one saved alongside the cookies
    #[must_use]
    pub fn with_identity(mut self, identity: Option<Identity>) -> Self {
        self.identity = identity;
        self
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Whether requests are made on behalf of a signed-in user
    pub fn is_authed(&self) -> bool {
        self.identity.is_some()
    }

    /// Username of the signed-in user
    pub fn username(&self) -> Result<&str> {
        self.require_identity().map(|i| i.username.as_str())
    }

    /// Id of the signed-in user
    pub fn user_id(&self) -> Result<u64> {
        self.require_identity().map(|i| i.id)
    }

    fn require_identity(&self) -> Result<&Identity> {
        self.identity
            .as_ref()
            .ok_or_else(|| Error::session("You need to login first."))
    }

    /// Underlying transport
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Ask the server who the session cookies belong to and remember it
    pub async fn refresh_identity(&mut self) -> Result<Option<&Identity>> {
        let response = self.http.get(SESSION_PATH, RequestConfig::new()).await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Error::http_status(status.as_u16(), text));
        }

        let body: JsonValue = serde_json::from_str(&text)
            .map_err(|e| Error::decode(format!("session response is not JSON: {e}")))?;
        self.identity = Identity::from_session_response(&body)?;
        debug!(
            "Session belongs to {:?}",
            self.identity.as_ref().map(|i| i.username.as_str())
        );
        Ok(self.identity.as_ref())
    }

    /// Run a tRPC query (GET)
    pub async fn query(&self, path: &str, input: &Native) -> Result<Native> {
        let input = encode_input(input)?;
        debug!("GET {}, input: {}", path, input);
        let response = self
            .http
            .get(path, RequestConfig::new().query("input", input.to_string()))
            .await?;
        read_response(response).await
    }

    /// Run a single tRPC query through the batch link (`?batch=1`)
    pub async fn query_batched(&self, path: &str, input: &Native) -> Result<Native> {
        let input: JsonObject = [("0".to_string(), encode_input(input)?)].into_iter().collect();
        let input = JsonValue::Object(input);
        debug!("GET {} (batch), input: {}", path, input);
        let request = RequestConfig::new()
            .query("batch", "1")
            .query("input", input.to_string());
        let (status, body) = read_json(self.http.get(path, request).await?).await?;

        match body {
            JsonValue::Array(mut results) if !results.is_empty() => {
                unwrap_result(status, results.swap_remove(0))
            }
            JsonValue::Array(_) => Err(Error::unexpected("batch response is empty")),
            other => unwrap_result(status, other),
        }
    }

    /// Run a tRPC mutation (POST)
    pub async fn mutate(&self, path: &str, input: &Native) -> Result<Native> {
        let input = encode_input(input)?;
        debug!("POST {}, input: {}", path, input);
        let response = self.http.post(path, input).await?;
        read_response(response).await
    }

    /// Stream every item of a cursor-paginated query
    pub fn iter_cursor<'a>(
        &'a self,
        path: &'a str,
        template: Native,
        items_key: &str,
    ) -> impl Stream<Item = Result<Native>> + 'a {
        let paginator = CursorPaginator::new(template).with_items_key(items_key);
        paginate_stream(paginator, move |request| async move {
            self.query(path, &request).await
        })
    }

    /// Stream every item of a page-numbered query
    pub fn iter_page<'a>(
        &'a self,
        path: &'a str,
        template: Native,
    ) -> impl Stream<Item = Result<Native>> + 'a {
        paginate_stream(PagePaginator::new(template), move |request| async move {
            self.query(path, &request).await
        })
    }
}

fn encode_input(input: &Native) -> Result<JsonValue> {
    let envelope = superjson::format(&strip_omitted(input))?;
    Ok(serde_json::to_value(envelope)?)
}

async fn read_response(response: Response) -> Result<Native> {
    let (status, body) = read_json(response).await?;
    unwrap_result(status, body)
}

async fn read_json(response: Response) -> Result<(u16, JsonValue)> {
    let status = response.status();
    let text = response.text().await?;

    match serde_json::from_str::<JsonValue>(&text) {
        Ok(body) => Ok((status.as_u16(), body)),
        Err(_) if !status.is_success() => Err(Error::http_status(status.as_u16(), text)),
        Err(e) => Err(Error::decode(format!("response is not JSON: {e}"))),
    }
}

/// Unwrap a tRPC response body into its decoded payload
pub(crate) fn unwrap_result(status: u16, body: JsonValue) -> Result<Native> {
    let JsonValue::Object(mut body) = body else {
        return Err(Error::unexpected("response body is not an object"));
    };

    if let Some(error) = body.remove("error") {
        return Err(Error::Api {
            status,
            error: superjson::parse_value(&error)?,
        });
    }

    let mut result: JsonObject = match body.remove("result") {
        Some(JsonValue::Object(result)) => result,
        _ => return Err(Error::unexpected("response has no 'result' object")),
    };
    let data = result
        .remove("data")
        .ok_or_else(|| Error::unexpected("response has no 'result.data'"))?;

    if result.contains_key("error") {
        return Err(Error::Api {
            status,
            error: superjson::parse_value(&data)?,
        });
    }

    superjson::parse_value(&data)
}
