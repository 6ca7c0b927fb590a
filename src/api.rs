//! Word lookup service client.
//!
//! The service answers `GET <base>?letters=<letters>` with a JSON body
//! describing the words that can be built from those letters, grouped by
//! length. The body is parsed even for non-2xx statuses because the service
//! puts its error text there.

use std::future::Future;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::{Deserialize, Serialize};

use crate::{zlog_debug, zlog_trace, Result};

/// Characters left unescaped, matching JavaScript's `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const USER_AGENT_VALUE: &str = concat!("anagramator/", env!("CARGO_PKG_VERSION"));

/// Words of one length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordGroup {
    pub length: u64,
    pub count: u64,
    #[serde(default)]
    pub words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    #[serde(default)]
    pub word_groups: Vec<WordGroup>,
    #[serde(default)]
    pub total_count: u64,
}

/// Body returned by the service, successful or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A parsed reply together with whether the HTTP status was 2xx.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupReply {
    pub ok: bool,
    pub body: ApiResponse,
}

/// Something that can look up words for a set of letters.
///
/// `Err` means the reply never arrived in usable form (network failure or a
/// body that is not valid JSON).
pub trait WordSource: Send + Sync + 'static {
    fn lookup(&self, letters: &str) -> impl Future<Output = Result<LookupReply>> + Send;
}

/// `WordSource` backed by the HTTP service.
#[derive(Debug, Clone)]
pub struct HttpWordSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpWordSource {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for `letters`.
    pub fn url_for(&self, letters: &str) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}letters={}",
            self.base_url,
            separator,
            encode_component(letters)
        )
    }
}

impl WordSource for HttpWordSource {
    async fn lookup(&self, letters: &str) -> Result<LookupReply> {
        let url = self.url_for(letters);
        zlog_debug!("HttpWordSource::lookup url={}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;
        zlog_trace!("HttpWordSource: status={} body={}", status, text);

        let body = parse_body(&text)?;
        Ok(LookupReply {
            ok: status.is_success(),
            body,
        })
    }
}

/// Parse a service body; anything that is not a JSON object is a transport failure.
pub fn parse_body(text: &str) -> Result<ApiResponse> {
    Ok(serde_json::from_str(text)?)
}

/// Percent-encode a query component the way browsers' `encodeURIComponent` does.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}
