use std::{fmt::Display, str::FromStr};

use serde::Deserialize;

/// Example ISO 20022 purpose codes accepted by most banking apps.
pub const COMMON_PURPOSE_CODES: &[&str] = &[
    "CHAR", "GDDS", "RENT", "SALA", "PENS", "DEPT", "BENE", "MTUP", "TRAD",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnknownCode {
    #[error("unknown EPC version {0:?}, expected \"001\" or \"002\"")]
    Version(String),
    #[error("unknown EPC character set {0:?}, expected \"1\"")]
    Charset(String),
}

/// EPC069-12 protocol version.
///
/// Version 001 requires a BIC, 002 makes it optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Version {
    #[serde(rename = "001")]
    V001,
    #[default]
    #[serde(rename = "002")]
    V002,
}

impl Version {
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::V001 => "001",
            Version::V002 => "002",
        }
    }

    pub fn requires_bic(&self) -> bool {
        matches!(self, Version::V001)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Version {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "001" => Ok(Version::V001),
            "002" => Ok(Version::V002),
            other => Err(UnknownCode::Version(other.to_string())),
        }
    }
}

/// Character set code of the payload. Only UTF-8 is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Charset {
    #[default]
    #[serde(rename = "1")]
    Utf8,
}

impl Charset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Charset::Utf8 => "1",
        }
    }
}

impl Display for Charset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Charset {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Charset::Utf8),
            other => Err(UnknownCode::Charset(other.to_string())),
        }
    }
}

/// Raw input for a single SEPA credit transfer QR code.
///
/// Values are kept as entered. Normalization (trimming, upper-casing, space
/// stripping) is done by the validator and the payload builder, and `None`
/// only becomes an empty line when the payload is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreditTransferFields {
    pub name: String,
    pub iban: String,
    pub bic: Option<String>,
    /// Decimal string, `,` or `.` as separator.
    pub amount: String,
    pub purpose_code: Option<String>,
    /// ISO 11649 creditor reference (`RF...`), not checked.
    pub structured_ref: Option<String>,
    pub unstructured_text: Option<String>,
    pub additional_info: Option<String>,
    #[serde(default)]
    pub version: Version,
    #[serde(default)]
    pub charset: Charset,
}

impl CreditTransferFields {
    pub fn new(name: impl ToString, iban: impl ToString, amount: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            iban: iban.to_string(),
            amount: amount.to_string(),
            ..Default::default()
        }
    }

    pub fn bic(&self) -> &str {
        opt(&self.bic)
    }

    pub fn purpose_code(&self) -> &str {
        opt(&self.purpose_code)
    }

    pub fn structured_ref(&self) -> &str {
        opt(&self.structured_ref)
    }

    pub fn unstructured_text(&self) -> &str {
        opt(&self.unstructured_text)
    }

    pub fn additional_info(&self) -> &str {
        opt(&self.additional_info)
    }

    /// The IBAN with spaces removed and upper-cased.
    pub fn compact_iban(&self) -> String {
        compact_iban(&self.iban)
    }
}

pub(crate) fn compact_iban(iban: &str) -> String {
    iban.replace(' ', "").to_uppercase()
}

fn opt(s: &Option<String>) -> &str {
    s.as_deref().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_version_and_charset() {
        assert_eq!("001".parse::<Version>(), Ok(Version::V001));
        assert_eq!(" 002 ".parse::<Version>(), Ok(Version::V002));
        assert_eq!(
            "003".parse::<Version>(),
            Err(UnknownCode::Version("003".to_string()))
        );
        assert_eq!("1".parse::<Charset>(), Ok(Charset::Utf8));
        assert!("2".parse::<Charset>().is_err());
        assert!(Version::V001.requires_bic());
        assert!(!Version::V002.requires_bic());
    }

    #[test]
    fn optional_accessors_map_none_to_empty() {
        let fields = CreditTransferFields::new("A", "de89 3704", "1");
        assert_eq!(fields.bic(), "");
        assert_eq!(fields.additional_info(), "");
        assert_eq!(fields.compact_iban(), "DE893704");
        assert_eq!(fields.version, Version::V002);
        assert_eq!(fields.charset, Charset::Utf8);
    }

    #[test]
    fn deserialize_from_toml() {
        let fields: CreditTransferFields = toml::from_str(
            r#"
            name = "Fabian Hiller"
            iban = "DE89 3704 0044 0532 0130 00"
            amount = "10,50"
            bic = "COBADEFFXXX"
            version = "001"
            "#,
        )
        .unwrap();
        assert_eq!(fields.version, Version::V001);
        assert_eq!(fields.bic.as_deref(), Some("COBADEFFXXX"));
        assert_eq!(fields.purpose_code, None);
        assert_eq!(fields.charset, Charset::Utf8);
    }
}
