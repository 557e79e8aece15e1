use contactform_models::contact::{ContactMethod, ContactSubmission};
use serde::Deserialize;

/// Request body of `POST /api/contact`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactSubmission {
    pub name: String,
    pub contact_method: ContactMethod,
    pub contact_info: String,
}

impl From<ApiContactSubmission> for ContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name,
            contact_method: value.contact_method,
            contact_info: value.contact_info,
        }
    }
}
