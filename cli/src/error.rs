/// Failures outside of the template itself
#[derive(Debug)]
pub enum Error {
    Io(String),
    Config(String),
    Json(String),
    Report(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Io(printable) => write!(f, "Could not read {printable}"),
            Error::Config(printable) => write!(f, "Invalid config: {printable}"),
            Error::Json(printable) => write!(f, "Invalid JSON: {printable}"),
            Error::Report(printable) => write!(f, "Could not report error: {printable}"),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}
