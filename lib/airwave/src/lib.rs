mod device;
pub use device::Device;

mod reading;
pub use reading::{AirQuality, Reading};

mod message;
pub use message::{ActiveEvent, ReadingEvent, SessionType, WsMessage};

mod select;
pub use select::Select;

mod api;
pub use api::{Api, DeviceReading, LastReading, TimedReading};

mod error;
pub use error::Error;

mod ws_client;
pub use ws_client::{WsClient, WsError};

pub type Result<T> = std::result::Result<T, Error>;
