//! EPC069-12 ("EPC QR code") payloads for SEPA credit transfers.
//!
//! [`validate`] checks a [`CreditTransferFields`] against the structural rules
//! of the guideline, [`build`] renders the twelve line payload that an
//! external encoder turns into a QR image.

mod export;
mod fields;
mod payload;
mod validate;

pub use export::{
    copy_payload, encode_qr, qr_file_name, validated_payload, Clipboard, ErrorCorrection,
    ExportError, QrImageEncoder, HOST_ERROR_CORRECTION,
};
pub use fields::{Charset, CreditTransferFields, UnknownCode, Version, COMMON_PURPOSE_CODES};
pub use payload::{build, AmountFormatError, EpcPayload, Slot, LINE_COUNT};
pub use validate::{
    validate, ErrorKind, ValidationError, MAX_ADDITIONAL_INFO_LEN, MAX_NAME_LEN,
    MAX_UNSTRUCTURED_TEXT_LEN,
};
