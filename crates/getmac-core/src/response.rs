//! Fully-read HTTP responses.
//!
//! A [`RawResponse`] is what remains of an exchange once the body stream has
//! been drained: status, headers and body bytes. Services read every response
//! into one before inspecting it, so the stream is released on every path.

use std::borrow::Cow;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Status, headers and body of a received response.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl RawResponse {
    /// Creates a raw response from its parts.
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Drains a live response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the body stream fails mid-read.
    pub async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(Self::new(status, headers, body.to_vec()))
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, with invalid UTF-8 replaced.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Passes the response through when its status equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedStatus`] carrying this response otherwise.
    pub fn expect_status(self, expected: StatusCode) -> Result<Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(Error::UnexpectedStatus {
                status: self.status.as_u16(),
                response: Box::new(self),
            })
        }
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decoding`] carrying this response if the body is not
    /// valid JSON of the requested shape.
    pub fn json<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(&self.body).map_err(|err| Error::Decoding {
            message: err.to_string(),
            response: Box::new(self.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        id: String,
    }

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            body.as_bytes().to_vec(),
        )
    }

    #[test]
    fn expect_status_passes_matching_status() {
        let raw = response(200, "{}").expect_status(StatusCode::OK).unwrap();
        assert_eq!(raw.status(), StatusCode::OK);
    }

    #[test]
    fn expect_status_rejects_other_status() {
        let err = response(202, "{}")
            .expect_status(StatusCode::OK)
            .unwrap_err();
        match err {
            Error::UnexpectedStatus { status, response } => {
                assert_eq!(status, 202);
                assert_eq!(response.body(), b"{}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn json_decodes_body() {
        let probe: Probe = response(200, r#"{"id":"a"}"#).json().unwrap();
        assert_eq!(probe, Probe { id: "a".into() });
    }

    #[test]
    fn json_failure_keeps_response() {
        let err = response(200, "<html>").json::<Probe>().unwrap_err();
        assert!(matches!(err, Error::Decoding { .. }));
        assert_eq!(err.response().unwrap().text(), "<html>");
    }

    #[test]
    fn text_is_lossy() {
        let raw = RawResponse::new(StatusCode::OK, HeaderMap::new(), vec![b'o', b'k', 0xff]);
        assert_eq!(raw.text(), "ok\u{fffd}");
    }
}
