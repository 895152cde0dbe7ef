use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Bare acknowledgement returned by batch endpoints (reorder, settings upsert).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self { Self { success: true } }
}
