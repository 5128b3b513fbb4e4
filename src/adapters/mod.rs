//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements            | Connects to              |
//! |------------|-----------------------|--------------------------|
//! | `hardware` | TemperatureSourcePort | ADC channels             |
//! |            | ActuatorPort          | Relay GPIO               |
//! |            | StatusSinkPort        | LED matrix               |
//! | `log_sink` | ReporterPort          | Serial log output        |
//! | `net`      | ReporterPort          | UDP report datagrams     |
//! |            | ConnectivityPort      | Link-state flag          |
//! | `nvs`      | ConfigStore           | NVS key/value flash      |
//! | `time`     | —                     | Monotonic system timer   |

pub mod hardware;
pub mod log_sink;
pub mod net;
pub mod nvs;
pub mod time;
