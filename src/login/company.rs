use crate::domain::Company;

/// Label shown while no known company is selected.
pub const NO_COMPANY_PLACEHOLDER: &str = "Select Company";

/// Result of splitting a composite `"id,code"` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanySelection {
    // ---
    pub id: String,
    pub code: String,
    pub error: Option<&'static str>,
}

/// Split a composite key on its first comma.
///
/// A missing id or code marks the selection invalid; the id then falls
/// back to `"0"`.
pub fn resolve_selection(composite_key: &str) -> CompanySelection {
    // ---
    let (id, code) = composite_key
        .split_once(',')
        .unwrap_or((composite_key, ""));

    let (id, code) = (id.trim(), code.trim());
    let error = (id.is_empty() || code.is_empty()).then_some("Please select a company");

    CompanySelection {
        id: if id.is_empty() { "0".to_string() } else { id.to_string() },
        code: code.to_string(),
        error,
    }
}

/// Display name of the selected company, or [`NO_COMPANY_PLACEHOLDER`].
pub fn display_name<'a>(selected_id: &str, selected_code: &str, companies: &'a [Company]) -> &'a str {
    // ---
    let key = format!("{selected_id},{selected_code}");
    companies
        .iter()
        .find(|company| company.composite_key == key)
        .map_or(NO_COMPANY_PLACEHOLDER, |company| company.display_name.as_str())
}

/// The key to auto-select: only a singleton list selects itself.
pub fn auto_selection(companies: &[Company]) -> Option<&str> {
    // ---
    match companies {
        [only] => Some(only.composite_key.as_str()),
        _ => None,
    }
}
