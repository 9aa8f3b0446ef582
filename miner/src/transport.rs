use std::time::Duration;

use async_trait::async_trait;
use kaleido_api::consts;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, REFERER, USER_AGENT};
use serde::de::DeserializeOwned;

use crate::error::Error;

/// Status and body of a completed http exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    /// Only a plain 200 counts as success.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_str(self.body.as_str()).map_err(From::from)
    }
}

/// The http surface the sessions talk through.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Response, Error>;
    async fn post(&self, url: &str, body: &serde_json::Value) -> Result<Response, Error>;
}

/// reqwest backed transport carrying the static testnet headers.
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// `timeout` bounds every request, so a stalled server surfaces as a
    /// failed attempt instead of hanging the caller.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(REFERER, HeaderValue::from_static(consts::REFERER));
        headers.insert(USER_AGENT, HeaderValue::from_static(consts::USER_AGENT));
        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self { http_client })
    }

    async fn read(resp: reqwest::Response) -> Result<Response, Error> {
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(Response { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Response, Error> {
        let resp = self.http_client.get(url).send().await?;
        Self::read(resp).await
    }

    async fn post(&self, url: &str, body: &serde_json::Value) -> Result<Response, Error> {
        let resp = self.http_client.post(url).json(body).send().await?;
        Self::read(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::stalled_server;

    #[test]
    fn only_200_is_success() {
        let ok = Response {
            status: 200,
            body: String::new(),
        };
        let created = Response {
            status: 201,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!created.is_success());
    }

    #[test]
    fn decodes_json_body() {
        let resp = Response {
            status: 200,
            body: r#"{"success":true,"balance":2.5}"#.to_string(),
        };
        let update: types::UpdateBalanceResponse = resp.json().unwrap();
        assert!(update.success);
        assert_eq!(update.balance, Some(2.5));
    }

    #[test]
    fn non_json_body_is_an_error() {
        let resp = Response {
            status: 200,
            body: "<html>bad gateway</html>".to_string(),
        };
        let err = resp.json::<types::UpdateBalanceResponse>().unwrap_err();
        assert!(matches!(err, Error::SerdeJson(_)));
    }

    #[test]
    fn builds_http_transport() {
        assert!(HttpTransport::new(Duration::from_secs(10)).is_ok());
    }

    #[tokio::test]
    async fn stalled_server_times_out() {
        let addr = stalled_server().await;
        let transport = HttpTransport::new(Duration::from_millis(200)).unwrap();
        let url = format!("http://{}/api/testnet/check-registration?wallet=0xAAA", addr);

        let result = tokio::time::timeout(Duration::from_secs(10), transport.get(url.as_str()))
            .await
            .expect("request should give up on its own");
        match result {
            Err(Error::Reqwest(err)) => assert!(err.is_timeout(), "error: {}", err),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
