use epc_qr_types::Euro;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::fields::{compact_iban, CreditTransferFields};

pub const MAX_NAME_LEN: usize = 70;
pub const MAX_UNSTRUCTURED_TEXT_LEN: usize = 140;
pub const MAX_ADDITIONAL_INFO_LEN: usize = 70;

static IBAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2}[0-9A-Z]{13,32}$").unwrap());
static BIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{8}([A-Za-z0-9]{3})?$").unwrap());
static PURPOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]{4}$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NameRequired,
    NameTooLong,
    IbanRequired,
    IbanFormatInvalid,
    BicRequired,
    BicFormatInvalid,
    AmountRequired,
    AmountNotPositive,
    AmountFormatError,
    PurposeFormatInvalid,
    UnstructuredTextTooLong,
    AdditionalInfoTooLong,
}

/// First rule a [`CreditTransferFields`] breaks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("creditor name is required")]
    NameRequired,
    #[error("IBAN is required")]
    IbanRequired,
    #[error("IBAN format is invalid: {0}")]
    IbanFormatInvalid(String),
    #[error("version 001 requires a BIC")]
    BicRequired,
    #[error("amount is required")]
    AmountRequired,
    #[error("amount must be a positive number: {0:?}")]
    AmountNotPositive(String),
    #[error("purpose code must be exactly 4 letters: {0:?}")]
    PurposeFormatInvalid(String),
    #[error("creditor name is {0} characters, at most 70 allowed")]
    NameTooLong(usize),
    #[error("BIC must be 8 or 11 alphanumeric characters: {0:?}")]
    BicFormatInvalid(String),
    #[error("unstructured text is {0} characters, at most 140 allowed")]
    UnstructuredTextTooLong(usize),
    #[error("additional info is {0} characters, at most 70 allowed")]
    AdditionalInfoTooLong(usize),
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::NameRequired => ErrorKind::NameRequired,
            ValidationError::IbanRequired => ErrorKind::IbanRequired,
            ValidationError::IbanFormatInvalid(_) => ErrorKind::IbanFormatInvalid,
            ValidationError::BicRequired => ErrorKind::BicRequired,
            ValidationError::AmountRequired => ErrorKind::AmountRequired,
            ValidationError::AmountNotPositive(_) => ErrorKind::AmountNotPositive,
            ValidationError::PurposeFormatInvalid(_) => ErrorKind::PurposeFormatInvalid,
            ValidationError::NameTooLong(_) => ErrorKind::NameTooLong,
            ValidationError::BicFormatInvalid(_) => ErrorKind::BicFormatInvalid,
            ValidationError::UnstructuredTextTooLong(_) => ErrorKind::UnstructuredTextTooLong,
            ValidationError::AdditionalInfoTooLong(_) => ErrorKind::AdditionalInfoTooLong,
        }
    }

    /// Key of the user-facing message in the host's translation tables.
    pub fn message_key(&self) -> &'static str {
        self.kind().message_key()
    }
}

impl ErrorKind {
    pub fn message_key(&self) -> &'static str {
        match self {
            ErrorKind::NameRequired => "err_name_req",
            ErrorKind::NameTooLong => "err_name_len",
            ErrorKind::IbanRequired => "err_iban_req",
            ErrorKind::IbanFormatInvalid => "err_iban_fmt",
            ErrorKind::BicRequired => "err_bic_req",
            ErrorKind::BicFormatInvalid => "err_bic_fmt",
            ErrorKind::AmountRequired => "err_amount_req",
            ErrorKind::AmountNotPositive | ErrorKind::AmountFormatError => "err_amount_pos",
            ErrorKind::PurposeFormatInvalid => "err_purpose_fmt",
            ErrorKind::UnstructuredTextTooLong => "err_text_len",
            ErrorKind::AdditionalInfoTooLong => "err_info_len",
        }
    }
}

/// Checks `fields` against the EPC069-12 structural rules.
///
/// Rules are checked in a fixed order and the first violation is returned,
/// so the same input always reports the same error.
pub fn validate(fields: &CreditTransferFields) -> Result<(), ValidationError> {
    let res = check(fields);
    if let Err(e) = &res {
        tracing::debug!(kind = ?e.kind(), "credit transfer rejected: {e}");
    }
    res
}

fn check(fields: &CreditTransferFields) -> Result<(), ValidationError> {
    let name = fields.name.trim();
    let iban = compact_iban(&fields.iban);
    let iban = iban.trim();
    let bic = fields.bic().trim();
    let amount = fields.amount.trim();
    let purpose = fields.purpose_code().trim();

    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if iban.is_empty() {
        return Err(ValidationError::IbanRequired);
    }
    if !IBAN.is_match(iban) {
        return Err(ValidationError::IbanFormatInvalid(iban.to_string()));
    }
    if fields.version.requires_bic() && bic.is_empty() {
        return Err(ValidationError::BicRequired);
    }
    if amount.is_empty() {
        return Err(ValidationError::AmountRequired);
    }
    match Euro::parse(amount) {
        Ok(e) if e.is_positive() => {}
        _ => return Err(ValidationError::AmountNotPositive(amount.to_string())),
    }
    if !purpose.is_empty() && !PURPOSE.is_match(purpose) {
        return Err(ValidationError::PurposeFormatInvalid(purpose.to_string()));
    }
    let name_len = name.chars().count();
    if name_len > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong(name_len));
    }
    if !bic.is_empty() && !BIC.is_match(bic) {
        return Err(ValidationError::BicFormatInvalid(bic.to_string()));
    }
    let text_len = fields.unstructured_text().chars().count();
    if text_len > MAX_UNSTRUCTURED_TEXT_LEN {
        return Err(ValidationError::UnstructuredTextTooLong(text_len));
    }
    let info_len = fields.additional_info().chars().count();
    if info_len > MAX_ADDITIONAL_INFO_LEN {
        return Err(ValidationError::AdditionalInfoTooLong(info_len));
    }
    Ok(())
}
