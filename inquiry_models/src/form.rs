use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A field of the contact form.
///
/// The declaration order is the order in which the fields appear on the form
/// and therefore the order in which focus moves to the first invalid field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Name,
    Email,
    Phone,
    Message,
}

impl FieldName {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Phone, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Message => "message",
        }
    }

    /// Human readable label used in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone number",
            Self::Message => "Message",
        }
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap<T> {
    pub name: T,
    pub email: T,
    pub phone: T,
    pub message: T,
}

impl<T> FieldMap<T> {
    pub fn from_fn(mut f: impl FnMut(FieldName) -> T) -> Self {
        Self {
            name: f(FieldName::Name),
            email: f(FieldName::Email),
            phone: f(FieldName::Phone),
            message: f(FieldName::Message),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &T)> {
        FieldName::ALL.into_iter().map(move |field| (field, &self[field]))
    }
}

impl<T> Index<FieldName> for FieldMap<T> {
    type Output = T;

    fn index(&self, field: FieldName) -> &Self::Output {
        match field {
            FieldName::Name => &self.name,
            FieldName::Email => &self.email,
            FieldName::Phone => &self.phone,
            FieldName::Message => &self.message,
        }
    }
}

impl<T> IndexMut<FieldName> for FieldMap<T> {
    fn index_mut(&mut self, field: FieldName) -> &mut Self::Output {
        match field {
            FieldName::Name => &mut self.name,
            FieldName::Email => &mut self.email,
            FieldName::Phone => &mut self.phone,
            FieldName::Message => &mut self.message,
        }
    }
}

/// Current raw values of the form fields.
pub type FormData = FieldMap<String>;

/// Whether the user has left a field or attempted to submit the form.
pub type TouchedState = FieldMap<bool>;

/// Current validation error of each field, `None` if the field is valid.
pub type FormErrors = FieldMap<Option<ValidationError>>;

impl FormErrors {
    /// The error message of `field`, or an empty string if the field is valid.
    pub fn message(&self, field: FieldName) -> String {
        self[field]
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, error)| error.is_none())
    }

    /// The first field in declaration order that has an error.
    pub fn first(&self) -> Option<FieldName> {
        self.iter()
            .find_map(|(field, error)| error.is_some().then_some(field))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    Required(FieldName),
    #[error("{} must be at least {min} characters", .field.label())]
    MinLength { field: FieldName, min: usize },
    #[error("{} must not exceed {max} characters", .field.label())]
    MaxLength { field: FieldName, max: usize },
    #[error("{} can only contain letters and spaces", .0.label())]
    Charset(FieldName),
    #[error("Please enter a valid email address")]
    Format,
    #[error("Phone number must be between {min} and {max} digits")]
    Length { min: usize, max: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    Required,
    MinLength,
    MaxLength,
    Charset,
    Format,
    Length,
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::Required(_) => ValidationErrorKind::Required,
            Self::MinLength { .. } => ValidationErrorKind::MinLength,
            Self::MaxLength { .. } => ValidationErrorKind::MaxLength,
            Self::Charset(_) => ValidationErrorKind::Charset,
            Self::Format => ValidationErrorKind::Format,
            Self::Length { .. } => ValidationErrorKind::Length,
        }
    }
}

/// The state of one form editing session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub data: FormData,
    pub errors: FormErrors,
    pub touched: TouchedState,
}

impl FormState {
    /// The feedback to render next to `field`.
    ///
    /// Errors are only shown once the field has been touched. A touched field
    /// without errors is marked valid as long as it is not empty.
    pub fn feedback(&self, field: FieldName) -> FieldFeedback {
        if !self.touched[field] {
            return FieldFeedback::Neutral;
        }
        match &self.errors[field] {
            Some(error) => FieldFeedback::Invalid(error.to_string()),
            None if !self.data[field].is_empty() => FieldFeedback::Valid,
            None => FieldFeedback::Neutral,
        }
    }

    pub fn payload(&self) -> SubmissionPayload {
        (&self.data).into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldFeedback {
    Neutral,
    Valid,
    Invalid(String),
}

/// The validated snapshot of the form that is handed to the mail relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl From<&FormData> for SubmissionPayload {
    fn from(data: &FormData) -> Self {
        Self {
            name: data.name.clone(),
            email: data.email.clone(),
            phone: data.phone.clone(),
            message: data.message.clone(),
        }
    }
}

/// Response of the mail relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResult {
    pub fn ok() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}
