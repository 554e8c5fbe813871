use thiserror::Error;
use vesta_core::TransportError;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),

    #[error("invalid server URL: {}", .0)]
    Url(#[from] url::ParseError),

    #[error("{}", .0)]
    Transport(#[from] TransportError),
}
