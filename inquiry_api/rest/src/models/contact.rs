use inquiry_models::contact::{
    ContactInquiry, ContactInquiryMessage, ContactInquiryName, ContactInquiryPhone,
};
use serde::Deserialize;

/// Contact inquiry as submitted by the form. Absent and `null` fields are
/// treated like empty ones.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiContactInquiry {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiContactInquiryError {
    /// At least one field is absent or empty after trimming.
    Missing,
    /// A field is present but unacceptable, e.g. an unparsable email address.
    Invalid,
}

impl TryFrom<ApiContactInquiry> for ContactInquiry {
    type Error = ApiContactInquiryError;

    fn try_from(value: ApiContactInquiry) -> Result<Self, Self::Error> {
        let [Some(name), Some(email), Some(phone), Some(message)] =
            [value.name, value.email, value.phone, value.message]
                .map(|field| field.filter(|x| !x.trim().is_empty()))
        else {
            return Err(ApiContactInquiryError::Missing);
        };

        Ok(Self {
            name: ContactInquiryName::try_from(name).map_err(|_| ApiContactInquiryError::Invalid)?,
            email: email
                .trim()
                .parse()
                .map_err(|_| ApiContactInquiryError::Invalid)?,
            phone: ContactInquiryPhone::try_from(phone)
                .map_err(|_| ApiContactInquiryError::Invalid)?,
            message: ContactInquiryMessage::try_from(message)
                .map_err(|_| ApiContactInquiryError::Invalid)?,
        })
    }
}
