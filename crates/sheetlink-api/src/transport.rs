//! REST transport: the `reqwest` implementation of `SheetsApi`.
//!
//! One method per wire operation; every call authenticates via the
//! token provider, issues a single HTTP request, and decodes either the
//! typed response or the service's structured error envelope.

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::auth::TokenProvider;
use crate::batch::{BatchUpdateRequest, BatchUpdateResponse};
use crate::error::{ApiError, Result};
use crate::service::SheetsApi;
use crate::types::{
    AppendValuesResponse, ClearValuesResponse, Spreadsheet, SpreadsheetProperties,
    UpdateValuesResponse, ValueInputOption, ValueRange,
};

/// Production endpoint of the spreadsheet service.
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

/// HTTP transport to the spreadsheet service.
pub struct RestTransport<P> {
    http: reqwest::Client,
    base_url: Url,
    token: P,
}

impl<P: TokenProvider> RestTransport<P> {
    /// Transport against the production endpoint.
    pub fn new(token: P) -> Self {
        let base_url = Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid");
        RestTransport {
            http: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    /// Transport against an alternate endpoint (staging, local stub).
    /// The URL must be hierarchical (http/https).
    pub fn with_base_url(token: P, base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Decode(format!(
                "base URL {base_url} is not hierarchical"
            )));
        }
        Ok(RestTransport {
            http: reqwest::Client::new(),
            base_url,
            token,
        })
    }

    /// Build an endpoint URL from path segments. Segments are
    /// percent-encoded, so range designators with spaces or unicode tab
    /// titles survive (`'My Tab'!A1:B2`).
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("base URL validated as hierarchical")
            .pop_if_empty()
            .extend(segments);
        url
    }

    /// Authenticate, send, and decode one request.
    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let token = self.token.access_token().await?;
        let response = request.bearer_auth(token).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(decode_service_error(status.as_u16(), &body));
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Decode the service's `{"error": {code, message, status}}` envelope,
/// falling back to the raw body when the envelope itself doesn't parse.
fn decode_service_error(http_code: u16, body: &str) -> ApiError {
    #[derive(Deserialize)]
    struct Envelope {
        error: ErrorBody,
    }
    #[derive(Deserialize, Default)]
    #[serde(default)]
    struct ErrorBody {
        code: u16,
        message: String,
        status: String,
    }

    match serde_json::from_str::<Envelope>(body) {
        Ok(envelope) => ApiError::Service {
            code: if envelope.error.code != 0 {
                envelope.error.code
            } else {
                http_code
            },
            status: envelope.error.status,
            message: envelope.error.message,
        },
        Err(_) => ApiError::Service {
            code: http_code,
            status: String::new(),
            message: body.trim().to_string(),
        },
    }
}

impl<P: TokenProvider> SheetsApi for RestTransport<P> {
    async fn create_spreadsheet(&self, properties: SpreadsheetProperties) -> Result<Spreadsheet> {
        let url = self.endpoint(&["v4", "spreadsheets"]);
        let body = Spreadsheet {
            properties: Some(properties),
            ..Spreadsheet::default()
        };
        tracing::debug!(%url, "create spreadsheet");
        self.send(self.http.post(url).query(&[("fields", "*")]).json(&body))
            .await
    }

    async fn get_spreadsheet(&self, spreadsheet_id: &str) -> Result<Spreadsheet> {
        let url = self.endpoint(&["v4", "spreadsheets", spreadsheet_id]);
        tracing::debug!(%url, "get spreadsheet");
        self.send(self.http.get(url)).await
    }

    async fn batch_update(
        &self,
        spreadsheet_id: &str,
        request: BatchUpdateRequest,
    ) -> Result<BatchUpdateResponse> {
        let url = self.endpoint(&["v4", "spreadsheets", &format!("{spreadsheet_id}:batchUpdate")]);
        tracing::debug!(%url, operations = request.requests.len(), "batch update");
        self.send(self.http.post(url).query(&[("fields", "*")]).json(&request))
            .await
    }

    async fn get_values(&self, spreadsheet_id: &str, range: &str) -> Result<ValueRange> {
        let url = self.endpoint(&["v4", "spreadsheets", spreadsheet_id, "values", range]);
        tracing::debug!(%url, "get values");
        self.send(self.http.get(url)).await
    }

    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        body: ValueRange,
        input: ValueInputOption,
    ) -> Result<UpdateValuesResponse> {
        let url = self.endpoint(&["v4", "spreadsheets", spreadsheet_id, "values", range]);
        tracing::debug!(%url, input = input.as_str(), "update values");
        self.send(
            self.http
                .put(url)
                .query(&[("valueInputOption", input.as_str())])
                .json(&body),
        )
        .await
    }

    async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        body: ValueRange,
        input: ValueInputOption,
    ) -> Result<AppendValuesResponse> {
        let url = self.endpoint(&[
            "v4",
            "spreadsheets",
            spreadsheet_id,
            "values",
            &format!("{range}:append"),
        ]);
        tracing::debug!(%url, input = input.as_str(), "append values");
        self.send(
            self.http
                .post(url)
                .query(&[("valueInputOption", input.as_str()), ("fields", "*")])
                .json(&body),
        )
        .await
    }

    async fn clear_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<ClearValuesResponse> {
        let url = self.endpoint(&[
            "v4",
            "spreadsheets",
            spreadsheet_id,
            "values",
            &format!("{range}:clear"),
        ]);
        tracing::debug!(%url, "clear values");
        self.send(self.http.post(url).json(&serde_json::json!({})))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticToken;

    fn transport() -> RestTransport<StaticToken> {
        RestTransport::new(StaticToken::new("t"))
    }

    #[test]
    fn endpoint_percent_encodes_segments() {
        let url = transport().endpoint(&["v4", "spreadsheets", "abc", "values", "My Tab!A1:B2"]);
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc/values/My%20Tab!A1:B2"
        );
    }

    #[test]
    fn endpoint_keeps_colon_suffix() {
        let url = transport().endpoint(&["v4", "spreadsheets", "abc:batchUpdate"]);
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc:batchUpdate"
        );
    }

    #[test]
    fn rejects_non_hierarchical_base() {
        let url = Url::parse("mailto:ops@example.com").unwrap();
        assert!(RestTransport::with_base_url(StaticToken::new("t"), url).is_err());
    }

    #[test]
    fn decodes_structured_error_envelope() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded for quota metric", "status": "RESOURCE_EXHAUSTED"}}"#;
        let err = decode_service_error(429, body);
        match &err {
            ApiError::Service { code, status, .. } => {
                assert_eq!(*code, 429);
                assert_eq!(status, "RESOURCE_EXHAUSTED");
            }
            other => panic!("expected Service error, got {other:?}"),
        }
        assert!(err.is_quota());
    }

    #[test]
    fn falls_back_to_raw_body_on_unparseable_error() {
        let err = decode_service_error(502, "<html>Bad Gateway</html>");
        match err {
            ApiError::Service { code, status, message } => {
                assert_eq!(code, 502);
                assert!(status.is_empty());
                assert_eq!(message, "<html>Bad Gateway</html>");
            }
            other => panic!("expected Service error, got {other:?}"),
        }
    }
}
