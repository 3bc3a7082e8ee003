use derive_more::From;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, From)]
pub enum Error {
    CliUsage(String),

    InvalidHttpResponse(String),

    #[from]
    Fmt(std::fmt::Error),

    #[from]
    SystemTime(std::time::SystemTimeError),

    #[from]
    File(std::io::Error),

    #[from]
    Json(serde_json::Error),

    #[from]
    Reqwest(reqwest::Error),

    #[from]
    Tracing(tracing::subscriber::SetGlobalDefaultError),
}

// region:    --- Error Boilerplate

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        match self {
            Error::CliUsage(msg) => write!(fmt, "{msg}"),
            Error::InvalidHttpResponse(msg) => write!(fmt, "invalid HTTP response: {msg}"),
            Error::Json(err) => write!(fmt, "undecodable response: {err}"),
            Error::Reqwest(err) => write!(fmt, "request failed: {err}"),
            Error::File(err) => write!(fmt, "file error: {err}"),
            _ => write!(fmt, "{self:?}"),
        }
    }
}

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
