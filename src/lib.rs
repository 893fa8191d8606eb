pub mod concurrent;
pub mod config;
pub mod http_client;
pub mod observation;
pub mod output;
pub mod probe;
pub mod utils;

pub use crate::concurrent::Dispatcher;
pub use crate::config::ProbeConfig;
pub use crate::observation::{Mode, Observation};
