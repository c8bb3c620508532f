use serde::{Deserialize, Serialize};

use crate::Reading;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ReadingEvent {
    pub id: String,
    pub data: Reading,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ActiveEvent {
    pub id: String,
    pub active: bool,
}

/// Envelope for every frame on the push channel, both directions.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum WsMessage {
    Identify(SessionType),
    Data(ReadingEvent),
    DeviceActive(ActiveEvent),
    KeepAlive,
}

/// Consumer scope declared in the handshake: the whole fleet or a
/// single device. The server filters its fan-out accordingly.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum SessionType {
    Main,
    Child(String),
}
