mod core;

pub use core::{MonitorService, TickReport};
