use async_trait::async_trait;
use std::time::Duration;

use super::{HttpExecutor, Request, Response, ResponseError, ResponseErrorKind};

pub struct ReqwestExecutor {
    client: reqwest::Client,
}

impl Default for ReqwestExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestExecutor {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Executor whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ResponseError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ResponseError::from)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: Request) -> Result<Response, ResponseError> {
        let url = build_url(&request)?;
        let response = self.client.get(url).send().await?;
        map_response(response).await
    }
}

fn build_url(request: &Request) -> Result<url::Url, ResponseError> {
    let parsed = match &request.params {
        Some(params) => url::Url::parse_with_params(&request.url, params),
        None => url::Url::parse(&request.url),
    };

    parsed.map_err(|e| ResponseError {
        kind: ResponseErrorKind::InvalidUrl,
        status: None,
        message: format!("{}: {}", request.url, e),
    })
}

async fn map_response(value: reqwest::Response) -> Result<Response, ResponseError> {
    let status = value.status().as_u16();
    let data = value
        .bytes()
        .await
        .map_err(|e| ResponseError {
            kind: ResponseErrorKind::BadResponse,
            status: Some(status),
            message: e.to_string(),
        })?
        .to_vec();

    Ok(Response {
        status,
        data: Some(data),
    })
}

impl From<reqwest::Error> for ResponseError {
    fn from(value: reqwest::Error) -> Self {
        let kind = if value.is_timeout() {
            ResponseErrorKind::Timeout
        } else if value.is_connect() {
            ResponseErrorKind::Connection
        } else {
            ResponseErrorKind::BadResponse
        };

        ResponseError {
            kind,
            status: value.status().map(|v| v.as_u16()),
            message: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_encodes_params() {
        let request = Request::get("https://www.googleapis.com/books/v1/volumes")
            .param("q", "intitle:the name of the wind")
            .param("maxResults", "20");

        let url = build_url(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/books/v1/volumes?q=intitle%3Athe+name+of+the+wind&maxResults=20"
        );
    }

    #[test]
    fn test_build_url_rejects_garbage() {
        let err = build_url(&Request::get("not a url")).unwrap_err();
        assert_eq!(err.kind, ResponseErrorKind::InvalidUrl);
    }
}
