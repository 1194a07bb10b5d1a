use confstore::backend::InMemory;
use serde_json::json;

use crate::helpers::{store_from_json, uuid};

/// Create a store holding a small device tree
pub fn create_device_store() -> InMemory {
    store_from_json(json!({
        "dicomConfigurationRoot": {
            "dicomDevicesRoot": {
                "dev1": {"_uuid": uuid(1), "port": 104, "connections": [{"hostname": "a"}]},
                "dev2": {"_uuid": uuid(2), "port": 105}
            }
        }
    }))
}
