//! Air interface operating modes, \[PEI\] 6.17.4.

use std::fmt;
use std::str::FromStr;

use tetralib_core::Error;

/// An operating mode of the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiMode {
    /// Trunked mode operation.
    Tmo,
    /// Direct mode operation.
    Dmo,
}

impl AiMode {
    /// The numeric code used on the PEI.
    pub fn code(self) -> u8 {
        match self {
            AiMode::Tmo => 0,
            AiMode::Dmo => 1,
        }
    }

    pub(crate) fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(AiMode::Tmo),
            1 => Some(AiMode::Dmo),
            _ => None,
        }
    }
}

impl fmt::Display for AiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiMode::Tmo => f.write_str("TMO"),
            AiMode::Dmo => f.write_str("DMO"),
        }
    }
}

impl FromStr for AiMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TMO" => Ok(AiMode::Tmo),
            "DMO" => Ok(AiMode::Dmo),
            other => Err(Error::Parse(format!("invalid operating mode {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_by_name_is_case_insensitive() {
        assert_eq!(" tmo ".parse::<AiMode>().unwrap(), AiMode::Tmo);
        assert_eq!("DMO".parse::<AiMode>().unwrap(), AiMode::Dmo);
        assert!("FMO".parse::<AiMode>().is_err());
    }

    #[test]
    fn mode_display_round_trips() {
        for mode in [AiMode::Tmo, AiMode::Dmo] {
            assert_eq!(mode.to_string().parse::<AiMode>().unwrap(), mode);
        }
    }
}
