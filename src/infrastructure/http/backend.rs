//! reqwest adapter for the e-Bios backend.
//!
//! One `HttpBackend` serves all three remote contracts of the login
//! screen: company directory, client parameters, and token issuing.

use super::wire::{ClientParameterDto, CompanyDto, TokenRequestDto, TokenResponseDto};
use crate::config::BackendConfig;
use crate::domain::{
    ClientParameter, Company, CompanyDirectory, ParameterStore, TokenIssuer, TokenRequest,
    TokenResponse,
};
use anyhow::{Context, Result};
use reqwest::Client;

const COMPANIES_PATH: &str = "/api/Company/GetCompanies";
const CLIENT_PARAMETER_PATH: &str = "/api/ClientParameter/GetClientParameter";
const GENERATE_TOKEN_PATH: &str = "/api/Auth/GenerateToken";

#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    http_client: Client,
}

impl HttpBackend {
    // ---
    /// Builds a client for the backend described by `config`.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        // ---
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("creating HTTP client")?;

        tracing::debug!("HTTP backend initialized with base_url={}", config.base_url);

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl CompanyDirectory for HttpBackend {
    // ---
    #[tracing::instrument(skip(self))]
    async fn get_companies(&self) -> Result<Vec<Company>> {
        // ---
        let companies: Vec<CompanyDto> = self
            .http_client
            .get(self.url(COMPANIES_PATH))
            .send()
            .await
            .context("sending company list request")?
            .error_for_status()
            .context("company list request failed")?
            .json()
            .await
            .context("decoding company list")?;

        Ok(companies.into_iter().map(Company::from).collect())
    }
}

#[async_trait::async_trait]
impl ParameterStore for HttpBackend {
    // ---
    #[tracing::instrument(skip(self))]
    async fn get_parameter(&self, code: &str) -> Result<Vec<ClientParameter>> {
        // ---
        let rows: Vec<ClientParameterDto> = self
            .http_client
            .get(self.url(CLIENT_PARAMETER_PATH))
            .query(&[("clParCode", code)])
            .send()
            .await
            .with_context(|| format!("sending client parameter request for {code}"))?
            .error_for_status()
            .with_context(|| format!("client parameter request for {code} failed"))?
            .json()
            .await
            .with_context(|| format!("decoding client parameter {code}"))?;

        Ok(rows.into_iter().map(|row| row.into_domain(code)).collect())
    }
}

#[async_trait::async_trait]
impl TokenIssuer for HttpBackend {
    // ---
    #[tracing::instrument(skip(self, request), fields(username = %request.username))]
    async fn generate_token(&self, request: TokenRequest) -> Result<TokenResponse> {
        // ---
        let response: TokenResponseDto = self
            .http_client
            .post(self.url(GENERATE_TOKEN_PATH))
            .json(&TokenRequestDto::from(&request))
            .send()
            .await
            .context("sending token request")?
            .error_for_status()
            .context("token request failed")?
            .json()
            .await
            .context("decoding token response")?;

        Ok(TokenResponse::from(response))
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use std::time::Duration;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        // ---
        let backend = HttpBackend::new(&BackendConfig {
            base_url: "http://his.local:8080/".to_string(),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap();

        assert_eq!(
            backend.url(COMPANIES_PATH),
            "http://his.local:8080/api/Company/GetCompanies"
        );
    }
}
