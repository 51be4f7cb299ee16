use std::{fmt::Debug, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseEuroError {
    #[error("amount is empty")]
    Empty,
    #[error("amount is not a number: {0:?}")]
    NotANumber(String),
    #[error("amount is not finite")]
    NotFinite,
}

/// An amount in euros, as typed by a user.
///
/// The value is kept exactly as parsed; rounding to cents only happens when
/// the amount is rendered, so that re-rendering never rounds twice.
#[derive(PartialEq, Clone, Copy, Default, PartialOrd)]
pub struct Euro(f64);

impl Euro {
    /// Parses a decimal amount that may use either `,` or `.` as separator.
    ///
    /// Surrounding whitespace is ignored. Non-finite values (`inf`, `NaN`)
    /// are rejected.
    pub fn parse(s: &str) -> Result<Self, ParseEuroError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseEuroError::Empty);
        }
        let f = s
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| ParseEuroError::NotANumber(s.to_string()))?;
        if !f.is_finite() {
            return Err(ParseEuroError::NotFinite);
        }
        Ok(Euro(f))
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// True when the amount renders as `0.00`.
    pub fn rounds_to_zero(&self) -> bool {
        self.cents_string()
            .bytes()
            .all(|b| matches!(b, b'0' | b'.' | b'-'))
    }

    /// Fixed two decimal rendering, e.g. `12.34`.
    ///
    /// Rounds half away from zero on the shortest decimal form of the value,
    /// so `2.675` becomes `2.68` even though its binary value is slightly
    /// below the midpoint.
    pub fn cents_string(&self) -> String {
        let repr = format!("{}", self.0.abs());
        let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

        let mut digits: Vec<u8> = int_part
            .bytes()
            .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(2))
            .collect();
        let round_up = frac_part.as_bytes().get(2).is_some_and(|d| *d >= b'5');
        if round_up {
            carry(&mut digits);
        }

        let split = digits.len() - 2;
        let negative = self.0.is_sign_negative() && digits.iter().any(|d| *d != b'0');
        let mut out = String::with_capacity(digits.len() + 2);
        if negative {
            out.push('-');
        }
        // digits only ever holds ASCII digits
        out.extend(digits[..split].iter().map(|d| *d as char));
        out.push('.');
        out.extend(digits[split..].iter().map(|d| *d as char));
        out
    }

    /// The EPC069-12 amount field, e.g. `EUR12.34`.
    pub fn epc_string(&self) -> String {
        format!("EUR{}", self.cents_string())
    }
}

/// Adds one to the last digit, carrying towards the front.
fn carry(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

impl FromStr for Euro {
    type Err = ParseEuroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Euro::parse(s)
    }
}

impl Debug for Euro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Euro").field(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Euro, ParseEuroError};
    use proptest::prelude::*;

    #[test]
    fn parses_comma_and_dot() {
        assert_eq!(Euro::parse("12,5").unwrap(), Euro(12.5));
        assert_eq!(Euro::parse(" 12.5 ").unwrap(), Euro(12.5));
        assert_eq!(Euro::parse("10").unwrap(), Euro(10.0));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Euro::parse("   "), Err(ParseEuroError::Empty));
        assert_eq!(
            Euro::parse("ten"),
            Err(ParseEuroError::NotANumber("ten".to_string()))
        );
        assert_eq!(
            Euro::parse("1,000.50"),
            Err(ParseEuroError::NotANumber("1,000.50".to_string()))
        );
        assert_eq!(Euro::parse("inf"), Err(ParseEuroError::NotFinite));
        assert_eq!(Euro::parse("NaN"), Err(ParseEuroError::NotFinite));
    }

    #[test]
    fn positivity() {
        assert!(Euro::parse("0.01").unwrap().is_positive());
        assert!(!Euro::parse("0").unwrap().is_positive());
        assert!(!Euro::parse("-5").unwrap().is_positive());
    }

    macro_rules! cents {
        ($($input:expr => $expected:expr),+ $(,)?) => {
            $(assert_eq!(Euro::parse($input).unwrap().cents_string(), $expected, "input {}", $input);)+
        };
    }

    #[test]
    fn rounds_half_away_from_zero() {
        cents!(
            "10" => "10.00",
            "12.3" => "12.30",
            "12.34" => "12.34",
            "12.344" => "12.34",
            "12.345" => "12.35",
            "2.675" => "2.68",
            "1.005" => "1.01",
            "0.125" => "0.13",
            "9.995" => "10.00",
            "99.999" => "100.00",
            "0.001" => "0.00",
            "0.005" => "0.01",
            "-1.005" => "-1.01",
            "-0.001" => "0.00",
        );
    }

    #[test]
    fn sub_cent_amounts_round_to_zero() {
        for input in ["0", "0.001", "0.004", "-0.004"] {
            assert!(Euro::parse(input).unwrap().rounds_to_zero(), "input {input}");
        }
        for input in ["0.005", "0.01", "-0.01", "10"] {
            assert!(!Euro::parse(input).unwrap().rounds_to_zero(), "input {input}");
        }
    }

    #[test]
    fn epc_string() {
        let e = Euro::parse("12,34").unwrap();
        assert_eq!(e.epc_string(), "EUR12.34");
        assert_eq!(Euro::parse("3.05").unwrap().epc_string(), "EUR3.05");
    }

    proptest! {
        #[test]
        fn cents_match_integer_input(euros in 0u32..10_000_000, cents in 0u32..100) {
            let input = format!("{euros}.{cents:02}");
            let e = Euro::parse(&input).unwrap();
            prop_assert_eq!(e.cents_string(), input);
        }

        #[test]
        fn epc_string_shape(value in 0.005f64..1.0e9) {
            let s = Euro(value).epc_string();
            let (whole, frac) = s.trim_start_matches("EUR").split_once('.').unwrap();
            prop_assert!(s.starts_with("EUR"));
            prop_assert!(!whole.is_empty() && whole.bytes().all(|b| b.is_ascii_digit()));
            prop_assert_eq!(frac.len(), 2);
            prop_assert!(frac.bytes().all(|b| b.is_ascii_digit()));
        }
    }
}
