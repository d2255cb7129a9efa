use super::error::INVALID_CREDENTIALS_MESSAGE;
use crate::domain::{TokenIssuerPtr, TokenRequest, TokenResponse};
use anyhow::Result;

/// Classified answer of the token issuer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenResult {
    // ---
    Success {
        token: String,
        user_id: i64,
        is_admin: bool,
        user_name: String,
    },
    Failure {
        message: String,
    },
}

impl From<TokenResponse> for TokenResult {
    fn from(response: TokenResponse) -> Self {
        // ---
        match response.token {
            Some(token) if !token.is_empty() => TokenResult::Success {
                token,
                user_id: response.user.user_id,
                is_admin: response.user.is_admin(),
                user_name: response.user.user_name,
            },
            _ => TokenResult::Failure {
                message: response
                    .user
                    .error_message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| INVALID_CREDENTIALS_MESSAGE.to_string()),
            },
        }
    }
}

/// Single round trip to the token issuer, no retries.
#[derive(Clone)]
pub struct CredentialExchange {
    issuer: TokenIssuerPtr,
}

impl CredentialExchange {
    // ---
    pub fn new(issuer: TokenIssuerPtr) -> Self {
        Self { issuer }
    }

    /// Submit validated credentials.
    ///
    /// # Errors
    /// Returns the issuer's error unchanged when the round trip itself
    /// failed. A credential rejection is `Ok(TokenResult::Failure)`.
    #[tracing::instrument(skip(self, request), fields(username = %request.username, company_id = request.company_id))]
    pub async fn submit(&self, request: TokenRequest) -> Result<TokenResult> {
        // ---
        let response = self.issuer.generate_token(request).await?;
        Ok(TokenResult::from(response))
    }
}
