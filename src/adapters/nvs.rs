//! NVS-backed configuration store.
//!
//! Reads the configuration keys once at boot from the default NVS
//! partition (`pivent` namespace) into fixed-size strings, then serves
//! them through [`ConfigStore`]. Parsing and fallback happen in
//! [`crate::config`]; missing or unreadable keys simply stay `None`.

#[cfg(target_os = "espidf")]
use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs};

#[cfg(target_os = "espidf")]
use crate::config::ConfigStore;
#[cfg(target_os = "espidf")]
use crate::error::{Error, Result};

#[cfg(target_os = "espidf")]
const NAMESPACE: &str = "pivent";

#[cfg(target_os = "espidf")]
const KEYS: [&str; 10] = [
    "cold_threshold",
    "not_cold_threshold",
    "not_hot_threshold",
    "hot_threshold",
    "change_delay_s",
    "manual_timeout_s",
    "report_address",
    "report_port",
    "report_interval_s",
    "control_port",
];

#[cfg(target_os = "espidf")]
pub struct NvsConfigStore {
    values: [Option<heapless::String<48>>; KEYS.len()],
}

#[cfg(target_os = "espidf")]
impl NvsConfigStore {
    /// Take the default NVS partition and snapshot every known key.
    pub fn load() -> Result<Self> {
        let partition =
            EspDefaultNvsPartition::take().map_err(|_| Error::Config("nvs partition taken"))?;
        let nvs =
            EspNvs::new(partition, NAMESPACE, false).map_err(|_| Error::Config("nvs namespace"))?;

        let mut values: [Option<heapless::String<48>>; KEYS.len()] = Default::default();
        let mut buf = [0u8; 64];
        for (slot, key) in values.iter_mut().zip(KEYS) {
            if let Ok(Some(text)) = nvs.get_str(key, &mut buf) {
                *slot = heapless::String::try_from(text).ok();
            }
        }
        Ok(Self { values })
    }
}

#[cfg(target_os = "espidf")]
impl ConfigStore for NvsConfigStore {
    fn get(&self, key: &str) -> Option<&str> {
        let index = KEYS.iter().position(|k| *k == key)?;
        self.values[index].as_deref()
    }
}
