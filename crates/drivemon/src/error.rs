use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid server address '{address}': {reason}")]
    AddressParse { address: String, reason: String },

    #[error("Failed to bind status server to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.is_not_found());

        let bind_err = Error::Bind {
            address: "ip4://127.0.0.1:6511".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        };
        assert!(!bind_err.is_not_found());
    }

    #[test]
    fn test_address_parse_display() {
        let err = Error::AddressParse {
            address: "nonsense".to_string(),
            reason: "missing port".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("nonsense"));
        assert!(msg.contains("missing port"));
    }
}
