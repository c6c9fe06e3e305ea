use nutype::nutype;

use crate::email_address::EmailAddress;

/// An inquiry received by the mail relay, after the required fields have been
/// checked again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInquiry {
    pub name: ContactInquiryName,
    pub email: EmailAddress,
    pub phone: ContactInquiryPhone,
    pub message: ContactInquiryMessage,
}

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactInquiryName(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 64),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactInquiryPhone(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 4096),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactInquiryMessage(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_values() {
        let name = ContactInquiryName::try_new("  John Doe \n").unwrap();
        assert_eq!(*name, "John Doe");
    }

    #[test]
    fn rejects_blank_values() {
        assert!(ContactInquiryPhone::try_new("   ").is_err());
        assert!(ContactInquiryMessage::try_new("").is_err());
    }

    #[test]
    fn rejects_long_values() {
        assert!(ContactInquiryName::try_new("x".repeat(257)).is_err());
        assert!(ContactInquiryName::try_new("x".repeat(256)).is_ok());
    }
}
