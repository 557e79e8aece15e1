use std::{collections::BTreeMap, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]+$").unwrap());

/// The channels a user can pick as their preferred contact route.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    #[default]
    Email,
    Phone,
    Whatsapp,
}

impl ContactMethod {
    pub const ALL: [Self; 3] = [Self::Email, Self::Phone, Self::Whatsapp];

    pub fn definition(self) -> &'static ContactMethodDefinition {
        match self {
            Self::Email => &CONTACT_METHODS[0],
            Self::Phone => &CONTACT_METHODS[1],
            Self::Whatsapp => &CONTACT_METHODS[2],
        }
    }

    pub fn id(self) -> &'static str {
        self.definition().id
    }

    pub fn label(self) -> &'static str {
        self.definition().label
    }
}

impl std::fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown contact method: {0:?}")]
pub struct UnknownContactMethod(pub String);

impl FromStr for ContactMethod {
    type Err = UnknownContactMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.id() == s)
            .ok_or_else(|| UnknownContactMethod(s.into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Email,
    Tel,
}

impl InputType {
    /// Normalize a raw value the way a browser does for an input of this
    /// type: email inputs drop surrounding whitespace, tel inputs drop line
    /// breaks.
    pub fn sanitize(self, value: &str) -> String {
        match self {
            Self::Email => value.trim().into(),
            Self::Tel => value.chars().filter(|c| !matches!(c, '\r' | '\n')).collect(),
        }
    }
}

/// Static reference data describing how a contact method is presented and
/// which pattern its contact info must match.
#[derive(Debug)]
pub struct ContactMethodDefinition {
    pub method: ContactMethod,
    pub id: &'static str,
    pub label: &'static str,
    pub input_type: InputType,
    pub placeholder: &'static str,
    pub pattern: &'static LazyLock<Regex>,
}

impl ContactMethodDefinition {
    pub fn validate(&self, contact_info: &str) -> Result<(), ValidationError> {
        if contact_info.trim().is_empty() {
            Err(ValidationError::ContactInfoRequired(self.method))
        } else if !self.pattern.is_match(contact_info) {
            Err(ValidationError::ContactInfoInvalid(self.method))
        } else {
            Ok(())
        }
    }
}

pub static CONTACT_METHODS: [ContactMethodDefinition; 3] = [
    ContactMethodDefinition {
        method: ContactMethod::Email,
        id: "email",
        label: "Email",
        input_type: InputType::Email,
        placeholder: "your@email.com",
        pattern: &EMAIL_REGEX,
    },
    ContactMethodDefinition {
        method: ContactMethod::Phone,
        id: "phone",
        label: "Phone",
        input_type: InputType::Tel,
        placeholder: "+1 (555) 000-0000",
        pattern: &PHONE_REGEX,
    },
    ContactMethodDefinition {
        method: ContactMethod::Whatsapp,
        id: "whatsapp",
        label: "WhatsApp",
        input_type: InputType::Tel,
        placeholder: "+1 (555) 000-0000",
        pattern: &PHONE_REGEX,
    },
];

/// A filled-in contact form, as posted by the form and relayed by the
/// submission handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub contact_method: ContactMethod,
    pub contact_info: String,
}

impl ContactSubmission {
    /// Check all fields. The contact info is always checked against the rule
    /// of the method stored in this submission.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();

        if self.name.trim().is_empty() {
            errors.insert(FormField::Name, ValidationError::NameRequired);
        }

        if let Err(err) = self.contact_method.definition().validate(&self.contact_info) {
            errors.insert(FormField::ContactInfo, err);
        }

        errors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    ContactInfo,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::ContactInfo => "contactInfo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,
    #[error("{} is required", .0.label())]
    ContactInfoRequired(ContactMethod),
    #[error("Please enter a valid {}", .0.label().to_lowercase())]
    ContactInfoInvalid(ContactMethod),
}

/// Per-field validation errors. Serializes as a map from field name to
/// human readable message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FormField, ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FormField) -> Option<ValidationError> {
        self.0.get(&field).copied()
    }

    pub fn insert(&mut self, field: FormField, error: ValidationError) {
        self.0.insert(field, error);
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, ValidationError)> + '_ {
        self.0.iter().map(|(&field, &error)| (field, error))
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(
            self.0
                .iter()
                .map(|(field, error)| (field.as_str(), error.to_string())),
        )
    }
}
