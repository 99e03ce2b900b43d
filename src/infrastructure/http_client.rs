use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde_json::Value;

use crate::domain::DomainError;

/// Trait for HTTP client operations (for mocking)
///
/// Bodies are JSON. A successful response with an empty body yields `Value::Null`.
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, DomainError>;

    async fn post_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value, DomainError>;

    async fn put_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value, DomainError>;

    async fn patch_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value, DomainError>;

    async fn delete(&self, url: &str, query: &[(&str, &str)]) -> Result<(), DomainError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn request(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> RequestBuilder {
        let mut request = self.client.request(method, url);

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        request
    }

    async fn execute(&self, request: RequestBuilder) -> Result<reqwest::Response, DomainError> {
        let response = request
            .send()
            .await
            .map_err(|e| DomainError::backend("http", format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::backend(
                "http",
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        Ok(response)
    }

    async fn execute_json(&self, request: RequestBuilder) -> Result<Value, DomainError> {
        let response = self.execute(request).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DomainError::backend("http", format!("Failed to read response: {}", e)))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| DomainError::backend("http", format!("Failed to parse response: {}", e)))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, DomainError> {
        self.execute_json(self.request(Method::GET, url, query, None))
            .await
    }

    async fn post_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value, DomainError> {
        self.execute_json(self.request(Method::POST, url, query, Some(body)))
            .await
    }

    async fn put_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value, DomainError> {
        self.execute_json(self.request(Method::PUT, url, query, Some(body)))
            .await
    }

    async fn patch_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value, DomainError> {
        self.execute_json(self.request(Method::PATCH, url, query, Some(body)))
            .await
    }

    async fn delete(&self, url: &str, query: &[(&str, &str)]) -> Result<(), DomainError> {
        self.execute(self.request(Method::DELETE, url, query, None))
            .await
            .map(|_| ())
    }
}

/// Append `segment` to the path of `base` as a single percent-encoded segment
///
/// Empty and dot segments are refused, they would address the parent resource.
pub fn join_segment(base: &str, segment: &str) -> Result<String, DomainError> {
    if matches!(segment, "" | "." | "..") {
        return Err(DomainError::validation(format!(
            "'{}' is not a usable resource id",
            segment
        )));
    }

    let mut url = Url::parse(base)
        .map_err(|e| DomainError::configuration(format!("Invalid base URL '{}': {}", base, e)))?;

    url.path_segments_mut()
        .map_err(|_| DomainError::configuration(format!("Base URL '{}' cannot hold a path", base)))?
        .push(segment);

    Ok(url.to_string())
}


#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Recorded request: method, url and query pairs
    pub type Call = (String, String, Vec<(String, String)>);

    /// Canned responses keyed by `"METHOD url"`
    #[derive(Debug, Default)]
    pub struct MockHttpClient {
        responses: RwLock<HashMap<String, Vec<Value>>>,
        errors: RwLock<HashMap<String, String>>,
        calls: RwLock<Vec<Call>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a response; repeated calls consume queued responses in order
        pub fn with_response(self, method: &str, url: &str, response: Value) -> Self {
            self.responses
                .write()
                .unwrap()
                .entry(format!("{} {}", method, url))
                .or_default()
                .push(response);
            self
        }

        pub fn with_error(self, method: &str, url: &str, error: impl Into<String>) -> Self {
            self.errors
                .write()
                .unwrap()
                .insert(format!("{} {}", method, url), error.into());
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.read().unwrap().clone()
        }

        fn respond(
            &self,
            method: &str,
            url: &str,
            query: &[(&str, &str)],
        ) -> Result<Value, DomainError> {
            self.calls.write().unwrap().push((
                method.to_string(),
                url.to_string(),
                query
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ));

            let key = format!("{} {}", method, url);

            if let Some(error) = self.errors.read().unwrap().get(&key) {
                return Err(DomainError::backend("mock", error));
            }

            let mut responses = self.responses.write().unwrap();
            match responses.get_mut(&key) {
                Some(queue) if queue.len() > 1 => Ok(queue.remove(0)),
                Some(queue) if queue.len() == 1 => Ok(queue[0].clone()),
                _ => Err(DomainError::backend(
                    "mock",
                    format!("No mock response for {}", key),
                )),
            }
        }
    }

    #[async_trait]
    impl HttpClientTrait for MockHttpClient {
        async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, DomainError> {
            self.respond("GET", url, query)
        }

        async fn post_json(
            &self,
            url: &str,
            query: &[(&str, &str)],
            _body: &Value,
        ) -> Result<Value, DomainError> {
            self.respond("POST", url, query)
        }

        async fn put_json(
            &self,
            url: &str,
            query: &[(&str, &str)],
            _body: &Value,
        ) -> Result<Value, DomainError> {
            self.respond("PUT", url, query)
        }

        async fn patch_json(
            &self,
            url: &str,
            query: &[(&str, &str)],
            _body: &Value,
        ) -> Result<Value, DomainError> {
            self.respond("PATCH", url, query)
        }

        async fn delete(&self, url: &str, query: &[(&str, &str)]) -> Result<(), DomainError> {
            self.respond("DELETE", url, query).map(|_| ())
        }
    }
}
