//! Reqwest-backed hero API adapter.
//!
//! This adapter owns transport details only: URL building, JSON encoding,
//! timeout and HTTP error mapping, and decoding into domain heroes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{HeroDto, HeroPayloadDto, SuperpowerDto, parse_validation_errors};
use crate::domain::ports::{HeroGateway, HeroGatewayError};
use crate::domain::{Hero, HeroId, HeroPayload, Superpower};

/// Backend address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
/// Key under which the backend nests field-keyed validation messages.
pub const DEFAULT_VALIDATION_ERRORS_KEY: &str = "errors";

const HEROES_PATH: &str = "api/Hero";
const SUPERPOWERS_PATH: &str = "api/Superpowers";

/// Hero gateway that talks JSON over HTTP to one backend.
#[derive(Debug, Clone)]
pub struct HttpHeroGateway {
    client: Client,
    base_url: Url,
    validation_errors_key: String,
}

impl HttpHeroGateway {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    /// ```rust,no_run
    /// # use std::time::Duration;
    /// # use frontend::outbound::http::{DEFAULT_BASE_URL, HttpHeroGateway};
    /// let base = reqwest::Url::parse(DEFAULT_BASE_URL).expect("valid url");
    /// let gateway = HttpHeroGateway::new(base, Duration::from_secs(30));
    /// assert!(gateway.is_ok());
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
            validation_errors_key: DEFAULT_VALIDATION_ERRORS_KEY.to_owned(),
        })
    }

    /// Read validation messages from `key` instead of the default envelope.
    #[must_use]
    pub fn with_validation_errors_key(mut self, key: impl Into<String>) -> Self {
        self.validation_errors_key = key.into();
        self
    }

    fn heroes_url(&self) -> Result<Url, HeroGatewayError> {
        join(&self.base_url, HEROES_PATH)
    }

    fn hero_url(&self, id: HeroId) -> Result<Url, HeroGatewayError> {
        join(&self.base_url, &format!("{HEROES_PATH}/{id}"))
    }

    fn superpowers_url(&self) -> Result<Url, HeroGatewayError> {
        join(&self.base_url, SUPERPOWERS_PATH)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "hero api request");
        self.client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, HeroGatewayError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(
                status,
                body.as_ref(),
                &self.validation_errors_key,
            ));
        }
        Ok(body.to_vec())
    }

    async fn fetch_hero(&self, request: RequestBuilder) -> Result<Hero, HeroGatewayError> {
        let body = self.send(request).await?;
        let dto: HeroDto = decode(&body, "hero")?;
        dto.into_domain().map_err(HeroGatewayError::decode)
    }
}

#[async_trait]
impl HeroGateway for HttpHeroGateway {
    async fn list_heroes(&self) -> Result<Vec<Hero>, HeroGatewayError> {
        let body = self
            .send(self.request(Method::GET, self.heroes_url()?))
            .await?;
        decode_hero_list(&body)
    }

    async fn get_hero(&self, id: HeroId) -> Result<Hero, HeroGatewayError> {
        self.fetch_hero(self.request(Method::GET, self.hero_url(id)?))
            .await
    }

    async fn create_hero(&self, payload: &HeroPayload) -> Result<Hero, HeroGatewayError> {
        let request = self
            .request(Method::POST, self.heroes_url()?)
            .json(&HeroPayloadDto::from(payload));
        self.fetch_hero(request).await
    }

    async fn update_hero(
        &self,
        id: HeroId,
        payload: &HeroPayload,
    ) -> Result<Hero, HeroGatewayError> {
        let request = self
            .request(Method::PUT, self.hero_url(id)?)
            .json(&HeroPayloadDto::from(payload));
        self.fetch_hero(request).await
    }

    async fn delete_hero(&self, id: HeroId) -> Result<(), HeroGatewayError> {
        self.send(self.request(Method::DELETE, self.hero_url(id)?))
            .await
            .map(drop)
    }

    async fn list_superpowers(&self) -> Result<Vec<Superpower>, HeroGatewayError> {
        let body = self
            .send(self.request(Method::GET, self.superpowers_url()?))
            .await?;
        let superpowers: Vec<SuperpowerDto> = decode(&body, "superpower list")?;
        Ok(superpowers
            .into_iter()
            .map(SuperpowerDto::into_domain)
            .collect())
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn join(base: &Url, path: &str) -> Result<Url, HeroGatewayError> {
    base.join(path).map_err(|error| {
        HeroGatewayError::transport(format!("cannot build URL for {path}: {error}"))
    })
}

fn decode<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T, HeroGatewayError> {
    serde_json::from_slice(body)
        .map_err(|error| HeroGatewayError::decode(format!("invalid {what} JSON payload: {error}")))
}

/// Decode the hero list, skipping heroes whose fields cannot be read so one
/// bad record does not hide the rest.
fn decode_hero_list(body: &[u8]) -> Result<Vec<Hero>, HeroGatewayError> {
    let heroes: Vec<HeroDto> = decode(body, "hero list")?;
    Ok(heroes
        .into_iter()
        .filter_map(|dto| match dto.into_domain() {
            Ok(hero) => Some(hero),
            Err(reason) => {
                warn!(%reason, "skipping unreadable hero in list");
                None
            }
        })
        .collect())
}

fn map_transport_error(error: reqwest::Error) -> HeroGatewayError {
    if error.is_timeout() {
        HeroGatewayError::timeout(error.to_string())
    } else {
        HeroGatewayError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8], envelope_key: &str) -> HeroGatewayError {
    if status.is_client_error() {
        if let Some(errors) = parse_validation_errors(body, envelope_key) {
            return HeroGatewayError::validation(errors);
        }
    }
    HeroGatewayError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network helpers.

    use super::*;
    use rstest::rstest;

    fn gateway(base: &str) -> HttpHeroGateway {
        HttpHeroGateway::new(
            Url::parse(base).expect("valid base url"),
            Duration::from_secs(5),
        )
        .expect("client builds")
    }

    #[rstest]
    #[case::bare_host("http://localhost:8080")]
    #[case::trailing_slash("http://localhost:8080/")]
    fn endpoints_resolve_under_the_host(#[case] base: &str) {
        let gateway = gateway(base);
        assert_eq!(
            gateway.heroes_url().expect("url").as_str(),
            "http://localhost:8080/api/Hero"
        );
        assert_eq!(
            gateway.hero_url(HeroId::new(12)).expect("url").as_str(),
            "http://localhost:8080/api/Hero/12"
        );
        assert_eq!(
            gateway.superpowers_url().expect("url").as_str(),
            "http://localhost:8080/api/Superpowers"
        );
    }

    #[rstest]
    fn base_path_prefix_is_kept() {
        let gateway = gateway("https://heroes.example.test/backend");
        assert_eq!(
            gateway.hero_url(HeroId::new(3)).expect("url").as_str(),
            "https://heroes.example.test/backend/api/Hero/3"
        );
    }

    #[rstest]
    fn client_error_with_field_map_is_a_validation_error() {
        let body = br#"{ "errors": { "heroName": ["must be unique"] } }"#;
        let error = map_status_error(StatusCode::BAD_REQUEST, body, "errors");
        let messages = error.validation_messages().expect("validation error");
        assert_eq!(messages.messages().collect::<Vec<_>>(), ["must be unique"]);
    }

    #[rstest]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, r#"{ "errors": { "name": ["x"] } }"#)]
    #[case::not_found(StatusCode::NOT_FOUND, "Not Found")]
    fn other_failures_keep_status_and_body(#[case] status: StatusCode, #[case] body: &str) {
        let error = map_status_error(status, body.as_bytes(), "errors");
        assert!(
            matches!(error, HeroGatewayError::Status { status: code, .. } if code == status.as_u16()),
            "expected a status error, got {error:?}"
        );
    }

    #[rstest]
    fn body_preview_compacts_and_truncates() {
        assert_eq!(body_preview(b"  not \n found "), "not found");
        let long = "x".repeat(200);
        let preview = body_preview(long.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }

    #[rstest]
    fn undecodable_success_body_is_a_decode_error() {
        let error = decode::<Vec<HeroDto>>(b"<html>", "hero list").expect_err("not JSON");
        assert!(matches!(error, HeroGatewayError::Decode { .. }));
    }

    #[rstest]
    fn unreadable_hero_is_skipped_from_the_list() {
        let body = br#"[
            { "id": 1, "name": "Barry Allen", "heroName": "Flash",
              "birthDate": "1956-03-19", "height": 1.8, "weight": 81 },
            { "id": 2, "name": "Hal Jordan", "heroName": "Green Lantern",
              "birthDate": "sometime", "height": 1.88, "weight": 90 }
        ]"#;

        let heroes = decode_hero_list(body).expect("list decodes");

        assert_eq!(heroes.len(), 1);
        assert_eq!(heroes[0].id, Some(HeroId::new(1)));
    }

    #[rstest]
    fn malformed_list_is_still_a_decode_error() {
        let error = decode_hero_list(br#"{ "heroes": [] }"#).expect_err("not an array");
        assert!(matches!(error, HeroGatewayError::Decode { .. }));
    }
}
