use std::fmt;
use std::str::FromStr;

use serde::de::{value, Error};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
pub enum Select {
    Last,
    #[serde(rename = "24H")]
    Hours24,
    #[serde(rename = "7D")]
    Days7,
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Select::Last => write!(f, "Last"),
            Select::Hours24 => write!(f, "24H"),
            Select::Days7 => write!(f, "7D"),
        }
    }
}

impl FromStr for Select {
    type Err = value::Error;

    fn from_str(s: &str) -> std::result::Result<Select, Self::Err> {
        match s {
            "Last" => Ok(Select::Last),
            "24H" => Ok(Select::Hours24),
            "7D" => Ok(Select::Days7),
            _ => Err(value::Error::custom(
                "supported select tokens are Last, 24H and 7D",
            )),
        }
    }
}
