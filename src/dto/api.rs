//! DTOs exposed by the JSON endpoints feeding the dependent dropdowns.

use serde::{Deserialize, Serialize};

/// Query parameters accepted by the option endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct OptionsQuery {
    /// Optional free-form search string.
    pub search: Option<String>,
    /// Optional page number for pagination.
    pub page: Option<usize>,
}

/// Entry of a `<select>` element.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectOption {
    pub id: i32,
    pub label: String,
    /// Secondary text, e.g. the species of a pet or the duration of a service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// One page of dropdown options.
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub items: Vec<SelectOption>,
    pub page: usize,
    pub last_page: usize,
    pub total: usize,
}
