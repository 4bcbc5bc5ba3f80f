use serde::{Deserialize, Serialize};

/// Value stored at each record leaf, e.g. `{"host":"10.0.0.1","ttl":300}`.
///
/// Empty fields are left out when encoding. Unknown fields written by other
/// SkyDNS clients (port, priority, weight, ...) are ignored when decoding.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Service {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub ttl: u32,
}

fn is_zero(ttl: &u32) -> bool {
    *ttl == 0
}
