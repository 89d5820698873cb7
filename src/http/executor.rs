use reqwest::header::CONTENT_TYPE;
use reqwest::{multipart, Client, Method};
use tracing::debug;
use url::Url;

use crate::error::EngineError;
use crate::http::client::build_client;
use crate::http::codec::{self, OutboundBody};
use crate::model::body::FormType;
use crate::model::definition::{RequestDefinition, ResponseDefinition};
use crate::model::field;
use crate::model::workspace::Workspace;

/// Issues one live HTTP call for a request definition against a workspace's
/// base endpoint. Every HTTP status counts as a completed call; only
/// transport-level failures are errors. The executor never writes to the
/// session cache — persisting the result is the caller's job.
#[derive(Debug, Clone)]
pub struct MockExecutor {
    client: Client,
}

impl Default for MockExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockExecutor {
    pub fn new() -> Self {
        Self { client: build_client() }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn execute(
        &self,
        request: &RequestDefinition,
        workspace: &Workspace,
    ) -> Result<ResponseDefinition, EngineError> {
        let method = Method::from_bytes(request.method.as_bytes()).map_err(|_| {
            EngineError::Validation(format!("invalid HTTP method {:?}", request.method))
        })?;
        let url = join_url(&workspace.endpoint, &request.path)?;
        debug!(%method, %url, "executing test call");

        let mut builder = self.client.request(method, url);

        let params = field::flatten(&request.parameters);
        if !params.is_empty() {
            builder = builder.query(&params);
        }
        for (key, value) in field::flatten(&request.headers) {
            builder = builder.header(&key, &value);
        }

        builder = match codec::encode_body(&request.body) {
            Some(OutboundBody::Raw { raw_type, value }) => {
                builder.body(value).header(CONTENT_TYPE, raw_type.mime())
            }
            Some(OutboundBody::Form { form_type: FormType::UrlEncoded, pairs }) => {
                builder.form(&pairs)
            }
            Some(OutboundBody::Form { form_type: FormType::Multipart, pairs }) => {
                let mut form = multipart::Form::new();
                for (key, value) in pairs {
                    form = form.text(key, value);
                }
                builder.multipart(form)
            }
            None => builder,
        };

        let response = builder.send().await.map_err(EngineError::Transport)?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let bytes = response.bytes().await.map_err(EngineError::Transport)?;

        Ok(codec::decode_response(
            status.as_u16(),
            &status_text,
            &headers,
            &bytes,
        ))
    }
}

/// Join the workspace endpoint and a request path into the target URL.
fn join_url(endpoint: &str, path: &str) -> Result<Url, EngineError> {
    let raw = if path.is_empty() {
        endpoint.to_string()
    } else {
        format!(
            "{}/{}",
            endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    };
    Url::parse(&raw)
        .map_err(|e| EngineError::Validation(format!("invalid target URL {raw:?}: {e}")))
}
