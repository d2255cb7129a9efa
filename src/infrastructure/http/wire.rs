//! JSON shapes of the e-Bios backend and their mapping to domain types.

use crate::domain::{ClientParameter, Company, IssuedUser, TokenRequest, TokenResponse};
use serde::{Deserialize, Deserializer, Serialize};

/// Ids come back as numbers from some deployments and as strings from others.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

#[derive(Debug, Deserialize)]
pub(super) struct CompanyDto {
    // ---
    #[serde(rename = "compIDCompCode")]
    comp_id_comp_code: String,

    #[serde(rename = "compID", deserialize_with = "string_or_number")]
    comp_id: String,

    #[serde(rename = "compCode")]
    comp_code: String,

    #[serde(rename = "compName")]
    comp_name: String,
}

impl From<CompanyDto> for Company {
    fn from(dto: CompanyDto) -> Self {
        Company {
            composite_key: dto.comp_id_comp_code,
            id: dto.comp_id,
            code: dto.comp_code,
            display_name: dto.comp_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ClientParameterDto {
    // ---
    #[serde(rename = "clParCode", default)]
    cl_par_code: String,

    #[serde(rename = "clParValue")]
    cl_par_value: String,
}

impl ClientParameterDto {
    // ---
    pub(super) fn into_domain(self, requested_code: &str) -> ClientParameter {
        // ---
        let code = if self.cl_par_code.is_empty() {
            requested_code.to_string()
        } else {
            self.cl_par_code
        };
        ClientParameter {
            code,
            value: self.cl_par_value,
        }
    }
}

#[derive(Serialize)]
pub(super) struct TokenRequestDto<'a> {
    // ---
    #[serde(rename = "UserName")]
    user_name: &'a str,

    #[serde(rename = "Password")]
    password: &'a str,

    #[serde(rename = "CompanyID")]
    company_id: i64,

    #[serde(rename = "CompanyCode")]
    company_code: &'a str,

    #[serde(rename = "CompanyName")]
    company_name: &'a str,
}

impl<'a> From<&'a TokenRequest> for TokenRequestDto<'a> {
    fn from(request: &'a TokenRequest) -> Self {
        TokenRequestDto {
            user_name: &request.username,
            password: &request.password,
            company_id: request.company_id,
            company_code: &request.company_code,
            company_name: &request.company_name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct TokenResponseDto {
    // ---
    #[serde(default)]
    token: Option<String>,

    #[serde(default)]
    user: TokenUserDto,
}

#[derive(Debug, Default, Deserialize)]
struct TokenUserDto {
    // ---
    #[serde(rename = "userID", default)]
    user_id: Option<i64>,

    #[serde(rename = "adminYN", default)]
    admin_yn: String,

    #[serde(rename = "userName", default)]
    user_name: String,

    #[serde(rename = "ErrorMessage", alias = "errorMessage", default)]
    error_message: Option<String>,
}

impl From<TokenResponseDto> for TokenResponse {
    fn from(dto: TokenResponseDto) -> Self {
        TokenResponse {
            token: dto.token,
            user: IssuedUser {
                user_id: dto.user.user_id.unwrap_or_default(),
                admin_yn: dto.user.admin_yn,
                user_name: dto.user.user_name,
                error_message: dto.user.error_message,
            },
        }
    }
}
