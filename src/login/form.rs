use super::company::{self, CompanySelection};
use super::error::ValidationError;
use super::expiry::{ExpiryStatus, NoticeLevel};
use crate::domain::Company;

/// Mutable state of the login screen.
///
/// Only the screen mutates it; callers read clones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    // ---
    pub username: String,
    pub password: String,

    /// Empty while nothing is selected.
    pub selected_company_id: String,
    pub selected_company_code: String,
    pub companies: Vec<Company>,
    pub error_message: String,
    pub is_submitting: bool,
    pub amc_warning: String,
    pub license_warning: String,
    pub license_days_remaining: i64,

    /// Set when the license notice forbids login.
    pub license_blocked: bool,
}

impl FormState {
    // ---
    pub(crate) fn apply_selection(&mut self, selection: CompanySelection) {
        // ---
        self.error_message = selection.error.unwrap_or_default().to_string();
        self.selected_company_id = selection.id;
        self.selected_company_code = selection.code;
    }

    pub(crate) fn apply_expiry(&mut self, status: &ExpiryStatus) {
        // ---
        self.amc_warning = status
            .amc
            .as_ref()
            .map(|notice| notice.message.clone())
            .unwrap_or_default();
        self.license_warning = status
            .license
            .as_ref()
            .map(|notice| notice.message.clone())
            .unwrap_or_default();
        self.license_days_remaining = status.license_days_remaining.ceil() as i64;
        self.license_blocked = status.license_blocks_login();
    }

    /// Parsed company id, if a complete selection has been made.
    pub fn selected_company(&self) -> Option<i64> {
        // ---
        if self.selected_company_code.is_empty() {
            return None;
        }
        self.selected_company_id.parse().ok()
    }

    /// Display name of the selected company.
    pub fn selected_company_name(&self) -> &str {
        company::display_name(
            &self.selected_company_id,
            &self.selected_company_code,
            &self.companies,
        )
    }

    /// Value to show in the company picker: the composite key, or empty.
    pub fn selected_company_key(&self) -> String {
        // ---
        if self.selected_company_id.is_empty() || self.selected_company_code.is_empty() {
            String::new()
        } else {
            format!("{},{}", self.selected_company_id, self.selected_company_code)
        }
    }

    /// Required-field checks, in priority order: company, username, password.
    pub fn validate(&self) -> Result<i64, ValidationError> {
        // ---
        let company_id = self
            .selected_company()
            .ok_or(ValidationError::CompanyNotSelected)?;
        if self.username.is_empty() {
            return Err(ValidationError::UsernameRequired);
        }
        if self.password.is_empty() {
            return Err(ValidationError::PasswordRequired);
        }
        Ok(company_id)
    }

    /// Severity of the license notice: blocking once no whole day remains.
    pub fn license_notice_level(&self) -> Option<NoticeLevel> {
        // ---
        if self.license_warning.is_empty() {
            None
        } else if self.license_blocked || self.license_days_remaining <= 0 {
            Some(NoticeLevel::Blocking)
        } else {
            Some(NoticeLevel::Warning)
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::login::company::resolve_selection;

    fn filled() -> FormState {
        let mut form = FormState {
            username: "alice".to_string(),
            password: "secret".to_string(),
            companies: vec![Company::new("1", "MAIN", "Main Hospital")],
            ..FormState::default()
        };
        form.apply_selection(resolve_selection("1,MAIN"));
        form
    }

    #[test]
    fn validation_priority_is_company_username_password() {
        // ---
        let empty = FormState::default();
        assert_eq!(empty.validate(), Err(ValidationError::CompanyNotSelected));

        let mut form = filled();
        form.username.clear();
        form.password.clear();
        assert_eq!(form.validate(), Err(ValidationError::UsernameRequired));

        form.username = "alice".to_string();
        assert_eq!(form.validate(), Err(ValidationError::PasswordRequired));

        assert_eq!(filled().validate(), Ok(1));
    }

    #[test]
    fn invalid_selection_sets_error_and_is_not_selected() {
        // ---
        let mut form = filled();
        form.apply_selection(resolve_selection("7"));

        assert_eq!(form.error_message, "Please select a company");
        assert_eq!(form.selected_company_id, "7");
        assert_eq!(form.selected_company(), None);
        assert_eq!(form.selected_company_key(), "");
    }

    #[test]
    fn selected_company_name_uses_company_list() {
        // ---
        let form = filled();
        assert_eq!(form.selected_company_name(), "Main Hospital");
        assert_eq!(form.selected_company_key(), "1,MAIN");
        assert_eq!(FormState::default().selected_company_name(), "Select Company");
    }

    #[test]
    fn license_notice_level_follows_days_remaining() {
        // ---
        let mut form = FormState::default();
        assert_eq!(form.license_notice_level(), None);

        form.license_warning = "Your License will expire in 3 day(s)".to_string();
        form.license_days_remaining = 3;
        assert_eq!(form.license_notice_level(), Some(NoticeLevel::Warning));

        form.license_days_remaining = 0;
        assert_eq!(form.license_notice_level(), Some(NoticeLevel::Blocking));
    }
}
