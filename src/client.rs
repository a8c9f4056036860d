use std::env;

use reqwest::{Method, StatusCode, blocking::Response, header::ACCEPT};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map as JsonMap, Value as JsonValue};
use url::Url;

use crate::record::{CreateRecord, Record};
use crate::utils::truncate_for_log;
use crate::{ApiError, ClientBuilderError, ClientError, Operation, RequestError};

const DEFAULT_ENDPOINT: &str = "https://api.dnsimple.com/v1/";

const TOKEN_HEADER: &str = "X-DNSimple-Token";

/// Statuses the API uses for a successful call.
const SUCCESS: [StatusCode; 4] = [
    StatusCode::OK,
    StatusCode::CREATED,
    StatusCode::ACCEPTED,
    StatusCode::NO_CONTENT,
];

/// Body of a response carrying a single record.
#[derive(Deserialize)]
struct RecordResponse {
    record: Record,
}

/// Builder for a [Client] that handles default values.
pub struct ClientBuilder {
    endpoint: Option<Url>,
    email: Option<String>,
    token: Option<String>,
}

impl ClientBuilder {
    fn new() -> Self {
        Self {
            endpoint: None,
            email: None,
            token: None,
        }
    }

    /// Returns a builder pre-filled from the `DNSIMPLE_EMAIL`, `DNSIMPLE_TOKEN`
    /// and `DNSIMPLE_URL` environment variables, for those that are set.
    ///
    /// # Errors
    /// - `UrlParse` if `DNSIMPLE_URL` is set but isn't a valid URL.
    pub fn from_env() -> Result<Self, ClientBuilderError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ClientBuilderError> {
        let endpoint = var("DNSIMPLE_URL")
            .map(|url| url.parse::<Url>())
            .transpose()?;

        Ok(Self {
            endpoint,
            email: var("DNSIMPLE_EMAIL"),
            token: var("DNSIMPLE_TOKEN"),
        })
    }

    /// Sets the API endpoint to the one given.
    ///
    /// Request paths are appended to the endpoint's path, so
    /// `https://api.dnsimple.com/v1` and `https://api.dnsimple.com/v1/` are
    /// equivalent.
    pub fn endpoint(mut self, endpoint: &Url) -> Self {
        self.endpoint = Some(endpoint.clone());
        self
    }

    /// In the case that `endpoint` is the Some variant, sets the API endpoint to it.
    pub fn endpoint_if_some(mut self, endpoint: Option<&Url>) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = Some(endpoint.clone());
        }
        self
    }

    /// Sets the account email to the one given.
    pub fn email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    /// Sets the API token to the one given.
    pub fn token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Builds a [Client] from the builder.
    ///
    /// In the case that no API endpoint is set, the default endpoint of
    /// `https://api.dnsimple.com/v1/` is used.
    ///
    /// # Errors
    /// - `MissingField` if a required field isn't added to the builder.
    /// - `InvalidEndpoint` if the endpoint can't have paths appended to it.
    /// - `UrlParse` if the default API endpoint fails to parse. This shouldn't happen.
    pub fn build(self) -> Result<Client, ClientBuilderError> {
        let endpoint = match self.endpoint {
            Some(endpoint) => endpoint,
            None => DEFAULT_ENDPOINT.parse()?,
        };
        if endpoint.cannot_be_a_base() {
            return Err(ClientBuilderError::InvalidEndpoint(endpoint.to_string()));
        }
        let email = self
            .email
            .ok_or_else(|| ClientBuilderError::MissingField("email".to_string()))?;
        let token = self
            .token
            .ok_or_else(|| ClientBuilderError::MissingField("token".to_string()))?;

        Ok(Client::new(&endpoint, &email, &token))
    }
}

/// API client.
///
/// Holds only immutable configuration, so it can be shared between threads.
pub struct Client {
    endpoint: Url,
    email: String,
    token: String,
    client: reqwest::blocking::Client,
}

impl Client {
    /// Creates a new Client.
    pub fn new(endpoint: &Url, email: &str, token: &str) -> Self {
        Self {
            endpoint: endpoint.clone(),
            email: email.to_string(),
            token: token.to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Returns a builder for a Client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a [Url] from the endpoint and the path segments.
    ///
    /// Segments are percent-encoded, so they can't break out of their position
    /// in the path.
    fn build_url(&self, path: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidEndpoint(self.endpoint.to_string()))?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }

    /// Sends a request, returning the response if the API reports success.
    fn send_request(
        &self,
        method: Method,
        url: Url,
        body: Option<JsonMap<String, JsonValue>>,
    ) -> Result<Response, RequestError> {
        log::debug!("{method} {url}");

        let mut request = self
            .client
            .request(method, url)
            .header(TOKEN_HEADER, format!("{}:{}", self.email, self.token))
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let resp = request.send()?;
        let status = resp.status();
        log::debug!("Response Status: {status}");

        if !SUCCESS.contains(&status) {
            let err = ApiError::from_response(resp);
            log::error!("{err}");
            return Err(err.into());
        }
        Ok(resp)
    }

    /// Reads the body of a successful response and decodes it.
    fn decode_response<T: DeserializeOwned>(
        resp: Response,
        operation: Operation,
    ) -> Result<T, ClientError> {
        let text = resp.text().map_err(|e| ClientError::Request {
            operation,
            source: e.into(),
        })?;

        serde_json::from_str(&text).map_err(|e| {
            log::error!("JSON parse failed: {e}");
            log::error!("Raw response: {}", truncate_for_log(&text));
            ClientError::Decode {
                operation,
                source: e,
            }
        })
    }

    /// Creates a record in the given domain, returning the id of the new record.
    ///
    /// `domain` is the domain's name or numeric id.
    ///
    /// A ttl that isn't an integer literal makes this return an empty id
    /// without an error, and without contacting the API.
    ///
    /// # Errors
    /// - `MissingArgument` if `domain` is empty.
    /// - `Request` if the request fails or the API returns an error.
    /// - `Decode` if the response isn't a record.
    pub fn create_record(
        &self,
        domain: &str,
        record: &CreateRecord,
    ) -> Result<String, ClientError> {
        if domain.is_empty() {
            return Err(ClientError::MissingArgument("domain"));
        }

        let params = match record.params() {
            Ok(params) => params,
            Err(e) => {
                log::warn!("not creating record {:?} in {domain}: {e}", record.name);
                return Ok(String::new());
            }
        };

        let url = self.build_url(&["domains", domain, "records"])?;

        let resp = self
            .send_request(Method::POST, url, Some(params))
            .map_err(|source| ClientError::Request {
                operation: Operation::Create,
                source,
            })?;

        let created: RecordResponse = Self::decode_response(resp, Operation::Create)?;
        Ok(created.record.string_id())
    }

    /// Destroys the record with the given id.
    ///
    /// # Errors
    /// - `MissingArgument` if `id` is empty.
    /// - `Request` if the request fails or the API returns an error.
    pub fn destroy_record(&self, id: &str) -> Result<(), ClientError> {
        if id.is_empty() {
            return Err(ClientError::MissingArgument("id"));
        }

        let url = self.build_url(&["records", id])?;

        self.send_request(Method::DELETE, url, None)
            .map_err(|source| ClientError::Request {
                operation: Operation::Destroy,
                source,
            })?;

        Ok(())
    }

    /// Retrieves the record with the given id.
    ///
    /// # Errors
    /// - `MissingArgument` if `id` is empty.
    /// - `Request` if the request fails or the API returns an error.
    /// - `Decode` if the response isn't a record.
    pub fn retrieve_record(&self, id: &str) -> Result<Record, ClientError> {
        if id.is_empty() {
            return Err(ClientError::MissingArgument("id"));
        }

        let url = self.build_url(&["records", id])?;

        let resp = self
            .send_request(Method::GET, url, None)
            .map_err(|source| ClientError::Request {
                operation: Operation::Retrieve,
                source,
            })?;

        let retrieved: RecordResponse = Self::decode_response(resp, Operation::Retrieve)?;
        Ok(retrieved.record)
    }
}
