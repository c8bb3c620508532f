use std::time::Duration;

use airwave::{Api, LastReading, SessionType, WsClient, WsError, WsMessage};
use log::{debug, error, info};
use tokio::time::timeout;

use crate::report::{Detail, Overview};
use crate::{DeviceState, Fleet, Result};

/// One consumer session: a snapshot-initialized fleet kept current by
/// the push channel.
pub struct Session {
    api: Api,
    ws_url: String,
    scope: SessionType,
    fleet: Fleet,
    client: Option<WsClient>,
}

impl Session {
    /// The snapshot must land before the session counts as
    /// initialized; until then no state is shown at all.
    pub async fn new(api: Api, ws_url: String, scope: SessionType) -> Result<Session> {
        let mut session = Session {
            api,
            ws_url,
            scope,
            fleet: Fleet::new(),
            client: None,
        };

        session.initialize().await?;

        info!("initialized with {} devices", session.fleet.len());

        Ok(session)
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Delivers push events into the fleet until the channel fails.
    /// Unparsable frames never take the connection down; transport
    /// errors and close frames do.
    pub async fn run(&mut self) -> Result<()> {
        let client = self.client.as_mut().ok_or(WsError::StreamClosed)?;

        loop {
            match client.read_message().await {
                Ok(WsMessage::Data(event)) => {
                    if self.fleet.apply_reading(&event.id, event.data) {
                        if let Some(state) = self.fleet.device(&event.id) {
                            log_state(&self.scope, state);
                        }
                    }
                }
                Ok(WsMessage::DeviceActive(event)) => {
                    if self.fleet.apply_active(&event.id, event.active) {
                        if let Some(state) = self.fleet.device(&event.id) {
                            log_state(&self.scope, state);
                        }
                    }
                }
                Ok(WsMessage::KeepAlive) => debug!("keep alive"),
                Ok(message) => info!("unsupported message: {:?}", message),
                Err(WsError::Pong) => (),
                Err(WsError::CannotParse(err)) => info!("ignored unsupported event: {err}"),
                Err(error) => {
                    let last_message_at = client.last_message_at().await;
                    error!("error reading airwave (last frame at {last_message_at:?}): {error}");

                    return Err(error.into());
                }
            }
        }
    }

    /// Tears the old connection down, then re-fetches the snapshot and
    /// replays the handshake on a fresh one.
    pub async fn reconnect(&mut self) -> Result<()> {
        if let Some(old) = self.client.take() {
            old.close().await;
        }

        timeout(Duration::from_secs(10), self.initialize()).await??;

        info!("reconnected with {} devices", self.fleet.len());

        Ok(())
    }

    pub async fn close(self) {
        if let Some(client) = self.client {
            client.close().await;
            info!("closed connection");
        }
    }

    async fn initialize(&mut self) -> Result<()> {
        self.load_snapshot().await?;

        let mut client = WsClient::connect(&self.ws_url).await?;
        client.identify(self.scope.clone()).await?;

        self.client = Some(client);

        Ok(())
    }

    async fn load_snapshot(&mut self) -> Result<()> {
        match &self.scope {
            SessionType::Main => {
                let (devices, readings) =
                    tokio::try_join!(self.api.devices(), self.api.devices_last_reading())?;

                self.fleet.apply_snapshot(devices, readings);
            }
            SessionType::Child(id) => {
                let (device, reading) =
                    tokio::try_join!(self.api.device(id), self.api.device_last_reading(id))?;

                let reading = LastReading {
                    id: device.id.clone(),
                    data: reading.data,
                    updated_at: reading.updated_at,
                };

                self.fleet.apply_snapshot(vec![device], vec![reading]);
            }
        }

        Ok(())
    }
}

fn log_state(scope: &SessionType, state: &DeviceState) {
    match scope {
        SessionType::Main => info!("{}", Overview(state)),
        SessionType::Child(_) => info!("{}", Detail(state)),
    }
}
