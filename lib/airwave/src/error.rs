use std::fmt;

use crate::ws_client::WsError;
use tokio_tungstenite::tungstenite::Message;

#[derive(Debug)]
pub enum Error {
    StreamClosed,
    UnexpectedMessage(Message),
    Pong,
    WebSocketError(tokio_tungstenite::tungstenite::error::Error),
    Http(chipp_http::Error),
    Io(std::io::Error),
    SerdeJson(serde_json::Error),
}

impl From<WsError> for Error {
    fn from(err: WsError) -> Self {
        match err {
            WsError::StreamClosed => Self::StreamClosed,
            WsError::CannotParse(err) => Self::SerdeJson(err),
            WsError::WebSocketError(err) => Self::WebSocketError(err),
            WsError::UnexpectedMessage(message) => Self::UnexpectedMessage(message),
            WsError::Pong => Self::Pong,
        }
    }
}

impl From<chipp_http::Error> for Error {
    fn from(err: chipp_http::Error) -> Self {
        Self::Http(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::SerdeJson(err)
    }
}

impl From<tokio_tungstenite::tungstenite::error::Error> for Error {
    fn from(err: tokio_tungstenite::tungstenite::error::Error) -> Self {
        Self::WebSocketError(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StreamClosed => write!(f, "stream closed"),
            Self::UnexpectedMessage(message) => write!(f, "unexpected message: {:?}", message),
            Self::Pong => write!(f, "pong"),
            Self::WebSocketError(err) => write!(f, "websocket error: {err}"),
            Self::Http(err) => write!(f, "http error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::SerdeJson(err) => write!(f, "json error: {err}"),
        }
    }
}

impl std::error::Error for Error {}
