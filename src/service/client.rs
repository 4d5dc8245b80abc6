//! HTTP implementation of the booking service boundary
//!
//! One hyper client instance is shared by every concurrent actor, so the
//! actors multiplex over a common connection pool the way a real burst of
//! clients behind a proxy would.

use crate::config::ServiceSettings;
use crate::domain::{
    AuthToken, EmailAddress, FlightId, Identity, Password, Seat, SeatId, TravelDate,
};
use crate::service::wire::{BookingRequest, LoginRequest, RegisterRequest, SeatRecord};
use crate::service::{BookingService, ServiceBaseUrl, ServiceError, AUTH_TOKEN_HEADER};
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::header::CONTENT_TYPE;
use hyper::{HeaderMap, Method, Request, Response, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use std::time::Duration;

/// Client for the booking service HTTP API
pub struct HttpBookingService {
    base_url: ServiceBaseUrl,
    request_timeout: Duration,
    client: Client<HttpConnector, Full<Bytes>>,
}

impl HttpBookingService {
    /// Create a client from service settings
    pub fn new(settings: &ServiceSettings) -> Result<Self, ServiceError> {
        let base_url = ServiceBaseUrl::try_new(settings.base_url.clone())
            .map_err(|_| ServiceError::InvalidBaseUrl(settings.base_url.clone()))?;
        Ok(Self::with_base_url(base_url, settings.request_timeout()))
    }

    /// Create a client against an explicit base URL (for testing)
    pub fn with_base_url(base_url: ServiceBaseUrl, request_timeout: Duration) -> Self {
        let client = Client::builder(TokioExecutor::new())
            .http1_title_case_headers(true)
            .http1_preserve_header_case(true)
            .build_http();

        Self {
            base_url,
            request_timeout,
            client,
        }
    }

    /// Build the target URI for an API path
    fn endpoint(&self, path: &str) -> Result<Uri, ServiceError> {
        let url = format!("{}{}", self.base_url.as_ref().trim_end_matches('/'), path);
        url.parse().map_err(|_| ServiceError::InvalidUri(url))
    }

    /// Forward the request with timeout
    async fn send(
        &self,
        request: Request<Full<Bytes>>,
    ) -> Result<Response<Incoming>, ServiceError> {
        tokio::time::timeout(self.request_timeout, self.client.request(request))
            .await
            .map_err(|_| ServiceError::RequestTimeout(self.request_timeout))?
            .map_err(|e| ServiceError::RequestFailed(format!("Connection error: {e}")))
    }

    /// POST a JSON body and pull the credential out of the response headers.
    /// Registration and login share this shape.
    async fn credential_request(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> Result<AuthToken, ServiceError> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint(path)?)
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))?;

        let response = self.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::UnexpectedStatus(status));
        }

        token_from_headers(response.headers())
    }
}

#[async_trait]
impl BookingService for HttpBookingService {
    async fn register(&self, identity: &Identity) -> Result<AuthToken, ServiceError> {
        let body = serde_json::to_vec(&RegisterRequest {
            username: identity.username.as_ref(),
            email: identity.email.as_ref(),
            password: identity.password.as_ref(),
        })?;
        self.credential_request("/api/users/register", body).await
    }

    async fn login(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<AuthToken, ServiceError> {
        let body = serde_json::to_vec(&LoginRequest {
            email: email.as_ref(),
            password: password.as_ref(),
        })?;
        self.credential_request("/api/users/login", body).await
    }

    async fn seat_snapshot(
        &self,
        token: &AuthToken,
        flight: FlightId,
        date: TravelDate,
    ) -> Result<Vec<Seat>, ServiceError> {
        let path = format!("/api/seats/{}/{}", flight, date.as_path_segment());
        let request = Request::builder()
            .method(Method::GET)
            .uri(self.endpoint(&path)?)
            .header(AUTH_TOKEN_HEADER, token.as_ref())
            .body(Full::new(Bytes::new()))?;

        let response = self.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::UnexpectedStatus(status));
        }

        let body = response.into_body().collect().await?.to_bytes();
        let records: Vec<SeatRecord> = serde_json::from_slice(&body)?;
        Ok(records.into_iter().map(Seat::from).collect())
    }

    async fn book_seat(
        &self,
        token: &AuthToken,
        flight: FlightId,
        seat: SeatId,
    ) -> Result<bool, ServiceError> {
        let body = serde_json::to_vec(&BookingRequest {
            flight_id: flight.into_inner(),
            seat_id: seat.into_inner(),
        })?;
        let request = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint("/api/bookings")?)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTH_TOKEN_HEADER, token.as_ref())
            .body(Full::new(Bytes::from(body)))?;

        let response = self.send(request).await?;
        Ok(response.status().is_success())
    }
}

/// Extract the credential header; a response with a missing, non-ASCII or
/// empty value is treated as carrying no credential at all.
fn token_from_headers(headers: &HeaderMap) -> Result<AuthToken, ServiceError> {
    let value = headers
        .get(AUTH_TOKEN_HEADER)
        .ok_or(ServiceError::MissingCredential)?;
    let token = value.to_str().map_err(|_| ServiceError::MissingCredential)?;
    AuthToken::try_new(token.to_string()).map_err(|_| ServiceError::MissingCredential)
}
