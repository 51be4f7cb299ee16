use std::fmt::Display;

use epc_qr_types::Euro;

use crate::{
    fields::{compact_iban, Charset, CreditTransferFields, Version},
    validate::ErrorKind,
};

const SERVICE_TAG: &str = "BCD";
const IDENTIFICATION: &str = "SCT";

/// Number of lines in every EPC069-12 payload.
pub const LINE_COUNT: usize = 12;

/// Raised by [`build`] for a non-empty amount that is not a positive number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("amount must be a positive number (e.g. 10.00), got {0:?}")]
pub struct AmountFormatError(pub String);

impl AmountFormatError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::AmountFormatError
    }
}

/// One of the twelve positions of the payload, in payload order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    ServiceTag,
    Version,
    Charset,
    Identification,
    Bic,
    Name,
    Iban,
    Amount,
    Purpose,
    StructuredReference,
    UnstructuredText,
    AdditionalInfo,
}

impl Slot {
    pub const ALL: [Slot; LINE_COUNT] = [
        Slot::ServiceTag,
        Slot::Version,
        Slot::Charset,
        Slot::Identification,
        Slot::Bic,
        Slot::Name,
        Slot::Iban,
        Slot::Amount,
        Slot::Purpose,
        Slot::StructuredReference,
        Slot::UnstructuredText,
        Slot::AdditionalInfo,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// A rendered EPC069-12 payload. Always exactly [`LINE_COUNT`] lines; empty
/// optional fields are kept as empty lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpcPayload {
    lines: [String; LINE_COUNT],
}

impl EpcPayload {
    pub fn lines(&self) -> &[String; LINE_COUNT] {
        &self.lines
    }

    pub fn line(&self, slot: Slot) -> &str {
        &self.lines[slot.index()]
    }

    /// Length of the joined payload in characters.
    pub fn char_len(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).sum::<usize>() + LINE_COUNT - 1
    }

    /// The lines numbered from `01`, followed by the payload length.
    pub fn numbered_preview(&self) -> String {
        let mut out = self
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:02}: {}", i + 1, line))
            .collect::<Vec<_>>()
            .join("\n");
        out.push_str(&format!("\n\n(len = {} chars)", self.char_len()));
        out
    }
}

impl Display for EpcPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

impl From<EpcPayload> for String {
    fn from(value: EpcPayload) -> Self {
        value.to_string()
    }
}

/// Field values after normalization, ready to be laid out.
struct PayloadStrings {
    version: &'static str,
    charset: &'static str,
    bic: String,
    name: String,
    iban: String,
    amount: String,
    purpose: String,
    structured_ref: String,
    unstructured_text: String,
    additional_info: String,
}

impl PayloadStrings {
    fn new(
        fields: &CreditTransferFields,
        version: Version,
        charset: Charset,
    ) -> Result<Self, AmountFormatError> {
        let structured_ref = single_line(fields.structured_ref()).trim().to_string();
        // a structured reference always wins over free text
        let unstructured_text = if structured_ref.is_empty() {
            single_line(fields.unstructured_text()).trim().to_string()
        } else {
            String::new()
        };

        Ok(Self {
            version: version.as_str(),
            charset: charset.as_str(),
            bic: single_line(fields.bic()).to_uppercase(),
            name: single_line(&fields.name).trim().to_string(),
            iban: single_line(&compact_iban(&fields.iban)),
            amount: amount_line(&fields.amount)?,
            purpose: single_line(fields.purpose_code()).to_uppercase(),
            structured_ref,
            unstructured_text,
            additional_info: single_line(fields.additional_info()),
        })
    }

    fn into_lines(self) -> [String; LINE_COUNT] {
        [
            SERVICE_TAG.to_string(),
            self.version.to_string(),
            self.charset.to_string(),
            IDENTIFICATION.to_string(),
            self.bic,
            self.name,
            self.iban,
            self.amount,
            self.purpose,
            self.structured_ref,
            self.unstructured_text,
            self.additional_info,
        ]
    }
}

/// Line breaks inside a field would shift every later line of the payload.
fn single_line(s: &str) -> String {
    s.replace(['\r', '\n'], " ")
}

fn amount_line(amount: &str) -> Result<String, AmountFormatError> {
    if amount.trim().is_empty() {
        return Ok(String::new());
    }
    match Euro::parse(amount) {
        // checked after rounding: `EUR0.00` is not a valid amount
        Ok(e) if e.is_positive() && !e.rounds_to_zero() => Ok(e.epc_string()),
        _ => Err(AmountFormatError(amount.to_string())),
    }
}

/// Renders the EPC069-12 payload for `fields`.
///
/// Meant to be called on validated input, but also usable for a live
/// preview: a blank amount gives an empty amount line, and other fields are
/// only normalized, never rejected. Line breaks inside a field become spaces.
/// The one failure is a non-empty amount that is not a positive number once
/// rounded to cents.
pub fn build(
    fields: &CreditTransferFields,
    version: Version,
    charset: Charset,
) -> Result<EpcPayload, AmountFormatError> {
    let lines = PayloadStrings::new(fields, version, charset)?.into_lines();
    let payload = EpcPayload { lines };
    tracing::debug!(
        version = version.as_str(),
        chars = payload.char_len(),
        "built EPC payload"
    );
    Ok(payload)
}

impl CreditTransferFields {
    /// [`build`] with the version and character set stored in the fields.
    pub fn to_payload(&self) -> Result<EpcPayload, AmountFormatError> {
        build(self, self.version, self.charset)
    }
}
