use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("sources must not be empty")]
    NoSources,
    #[error("servers must be greater than 0")]
    ServersZero,
    #[error("requests must be greater than 0")]
    RequestsZero,
    #[error("failed to render output: {0}")]
    Output(String),
    #[error("{0}")]
    Cli(String),
}

pub type Result<T> = std::result::Result<T, Error>;
