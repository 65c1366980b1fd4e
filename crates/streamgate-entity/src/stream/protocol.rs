//! Ingest protocol enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Protocols a stream may be published over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "stream_protocol", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StreamProtocol {
    /// RTMP only.
    Rtmp,
    /// SRT only.
    Srt,
    /// Either protocol.
    Both,
}

impl StreamProtocol {
    /// Return the protocol as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rtmp => "rtmp",
            Self::Srt => "srt",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for StreamProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StreamProtocol {
    type Err = streamgate_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rtmp" => Ok(Self::Rtmp),
            "srt" => Ok(Self::Srt),
            "both" => Ok(Self::Both),
            _ => Err(streamgate_core::AppError::validation(format!(
                "Invalid stream protocol: '{s}'. Expected one of: rtmp, srt, both"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("rtmp".parse::<StreamProtocol>().unwrap(), StreamProtocol::Rtmp);
        assert_eq!("SRT".parse::<StreamProtocol>().unwrap(), StreamProtocol::Srt);
        assert!("hls".parse::<StreamProtocol>().is_err());
    }
}
