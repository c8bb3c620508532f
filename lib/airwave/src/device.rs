use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(rename = "box")]
    pub box_: String,

    pub lat: f32,
    pub long: f32,

    pub active: bool,
}
