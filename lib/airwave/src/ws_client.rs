use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use log::debug;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::{Result, SessionType, WsMessage};

#[derive(Debug)]
pub enum WsError {
    StreamClosed,
    CannotParse(serde_json::Error),
    WebSocketError(tokio_tungstenite::tungstenite::error::Error),
    UnexpectedMessage(Message),
    Pong,
}

impl fmt::Display for WsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WsError::StreamClosed => write!(f, "stream closed"),
            WsError::CannotParse(error) => write!(f, "cannot parse: {}", error),
            WsError::WebSocketError(error) => write!(f, "websocket error: {}", error),
            WsError::UnexpectedMessage(message) => write!(f, "unexpected message: {:?}", message),
            WsError::Pong => write!(f, "pong"),
        }
    }
}

impl std::error::Error for WsError {}

impl From<serde_json::Error> for WsError {
    fn from(value: serde_json::Error) -> Self {
        WsError::CannotParse(value)
    }
}

impl From<tokio_tungstenite::tungstenite::error::Error> for WsError {
    fn from(value: tokio_tungstenite::tungstenite::error::Error) -> Self {
        if let tokio_tungstenite::tungstenite::error::Error::AlreadyClosed = value {
            WsError::StreamClosed
        } else {
            WsError::WebSocketError(value)
        }
    }
}

type Writer = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type Reader = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// One persistent push channel connection. Frames come out in arrival
/// order; the client never reconnects on its own.
#[derive(Clone)]
pub struct WsClient {
    write: Arc<Mutex<Writer>>,
    read: Arc<Mutex<Reader>>,
    last_message_at: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl WsClient {
    pub async fn connect(url: &str) -> Result<WsClient> {
        let (web_socket, _) = connect_async(url).await?;

        let (write, read) = web_socket.split();

        Ok(WsClient {
            write: Arc::new(Mutex::new(write)),
            read: Arc::new(Mutex::new(read)),
            last_message_at: Arc::new(Mutex::new(None)),
        })
    }

    /// Must be the first frame sent on a fresh connection.
    pub async fn identify(&mut self, session_type: SessionType) -> Result<()> {
        self.send_message(WsMessage::Identify(session_type)).await
    }

    pub async fn send_message(&mut self, message: WsMessage) -> Result<()> {
        let text = serde_json::to_string(&message)?;
        debug!("sent {}", text);

        let mut write = self.write.lock().await;
        write.send(Message::Text(text.into())).await?;

        Ok(())
    }

    pub async fn read_message(&mut self) -> std::result::Result<WsMessage, WsError> {
        let mut read = self.read.lock().await;

        match read.next().await.ok_or(WsError::StreamClosed)? {
            Ok(message) => {
                self.mark_received().await;

                match message {
                    Message::Text(text) => {
                        let message: WsMessage = serde_json::from_str(&text)?;
                        debug!("received {:?}", message);
                        Ok(message)
                    }
                    Message::Ping(payload) => {
                        let mut write = self.write.lock().await;
                        write.send(Message::Pong(payload)).await?;

                        Err(WsError::Pong)
                    }
                    message => Err(WsError::UnexpectedMessage(message)),
                }
            }
            Err(error) => Err(error)?,
        }
    }

    /// Arrival time of the most recent inbound frame of any kind,
    /// keep-alives included. Diagnostic only.
    pub async fn last_message_at(&self) -> Option<DateTime<Utc>> {
        *self.last_message_at.lock().await
    }

    pub async fn close(self) {
        let mut write = self.write.lock().await;
        _ = write.send(Message::Close(None)).await;
    }

    async fn mark_received(&self) {
        let mut last_message_at = self.last_message_at.lock().await;
        *last_message_at = Some(Utc::now());
    }
}
