mod intent;
pub(crate) mod provider;
mod service;
pub(crate) mod state;

pub use intent::{IntentTemplates, NotificationIntent};
pub use provider::{ActiveStatusSource, ProbeError, StatusSource};
pub use service::MonitorService;
#[allow(unused_imports)]
pub use self::{
    intent::NotificationKind,
    service::TickReport,
    state::{AlarmState, AlarmStatus, DailySchedule, MonitorState, Transition},
};
