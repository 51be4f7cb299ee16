//! Interfaces to the collaborators that consume a finished payload.
//!
//! Rendering the QR image and talking to the system clipboard are left to
//! the host; this module only fixes what the host gets handed.

use epc_qr_types::{Date, Euro};

use crate::{payload::EpcPayload, validate, CreditTransferFields, ValidationError};

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCorrection {
    Low,
    #[default]
    Medium,
    Quartile,
    High,
}

/// Level used for every EPC QR code the host saves.
pub const HOST_ERROR_CORRECTION: ErrorCorrection = ErrorCorrection::Medium;

pub trait QrImageEncoder {
    type Image;
    type Error: std::error::Error;

    fn encode(&self, payload: &str, level: ErrorCorrection) -> Result<Self::Image, Self::Error>;
}

pub trait Clipboard {
    type Error: std::error::Error;

    /// Replaces the clipboard contents with `text`, verbatim.
    fn set_text(&mut self, text: &str) -> Result<(), Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError<E: std::error::Error> {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Amount error: {0}")]
    Amount(#[from] crate::AmountFormatError),
    #[error("Collaborator error: {0}")]
    Collaborator(E),
}

/// Validates `fields` and builds the payload they describe.
pub fn validated_payload(
    fields: &CreditTransferFields,
) -> Result<EpcPayload, ExportError<std::convert::Infallible>> {
    validate(fields)?;
    Ok(fields.to_payload()?)
}

/// Validates, builds and encodes `fields` as a QR image at the host level.
pub fn encode_qr<Q: QrImageEncoder>(
    encoder: &Q,
    fields: &CreditTransferFields,
) -> Result<Q::Image, ExportError<Q::Error>> {
    validate(fields)?;
    let payload = fields.to_payload()?;
    encoder
        .encode(&payload.to_string(), HOST_ERROR_CORRECTION)
        .map_err(ExportError::Collaborator)
}

/// Validates, builds and copies the payload for `fields` to the clipboard.
pub fn copy_payload<C: Clipboard>(
    clipboard: &mut C,
    fields: &CreditTransferFields,
) -> Result<(), ExportError<C::Error>> {
    validate(fields)?;
    let payload: String = fields.to_payload()?.into();
    clipboard
        .set_text(&payload)
        .map_err(ExportError::Collaborator)
}

const UNSAFE_FILE_NAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// File name for a saved QR image:
/// `{amount}_{last 10 IBAN digits}_{YYYY-MM-DD}.png`.
///
/// The amount is written with two decimals, or `NA` when it does not parse.
/// When the IBAN has no digits at all its last ten characters are used.
pub fn qr_file_name(amount: &str, iban: &str, date: Date) -> String {
    let amount = match Euro::parse(amount) {
        Ok(e) => e.cents_string(),
        Err(_) => "NA".to_string(),
    };

    let digits: Vec<char> = iban.chars().filter(|c| c.is_ascii_digit()).collect();
    let tail: String = if digits.is_empty() {
        let compact: Vec<char> = iban.chars().filter(|c| *c != ' ').collect();
        compact[compact.len().saturating_sub(10)..].iter().collect()
    } else {
        digits[digits.len().saturating_sub(10)..].iter().collect()
    };

    format!("{amount}_{tail}_{date}.png")
        .chars()
        .filter(|c| !UNSAFE_FILE_NAME_CHARS.contains(c))
        .collect()
}
