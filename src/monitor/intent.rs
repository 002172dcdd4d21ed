use std::path::PathBuf;

use crate::config::Config;

use super::state::Transition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    AlarmRaised,
    AlarmCleared,
    DailyCommemoration,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::AlarmRaised => "alarm_raised",
            NotificationKind::AlarmCleared => "alarm_cleared",
            NotificationKind::DailyCommemoration => "daily_commemoration",
        }
    }
}

/// One outbound message. Built and consumed within a single tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationIntent {
    pub kind: NotificationKind,
    /// HTML caption, already escaped.
    pub caption: String,
    pub image: PathBuf,
}

#[derive(Debug, Clone)]
pub struct IntentTemplates {
    area_name: String,
    alarm_image: PathBuf,
    all_clear_image: PathBuf,
    commemoration_image: PathBuf,
}

impl IntentTemplates {
    pub fn from_config(config: &Config) -> Self {
        Self {
            area_name: config.area_name.clone(),
            alarm_image: PathBuf::from(&config.assets.alarm_image),
            all_clear_image: PathBuf::from(&config.assets.all_clear_image),
            commemoration_image: PathBuf::from(&config.assets.commemoration_image),
        }
    }

    pub fn for_transition(&self, transition: Transition) -> Option<NotificationIntent> {
        let area = html_escape::encode_text(&self.area_name);
        match transition {
            Transition::Raised => Some(NotificationIntent {
                kind: NotificationKind::AlarmRaised,
                caption: format!(
                    "🚨 <b>УВАГА! ПОВІТРЯНА ТРИВОГА!</b> 🚨\n\n<b>{}</b>\n\n<b>Терміново прямуйте до найближчого укриття!</b>",
                    area
                ),
                image: self.alarm_image.clone(),
            }),
            Transition::Cleared => Some(NotificationIntent {
                kind: NotificationKind::AlarmCleared,
                caption: format!(
                    "✅ <b>ВІДБІЙ ПОВІТРЯНОЇ ТРИВОГИ</b> ✅\n\n<b>{}</b>\n\nМожна повертатися з укриття. Зберігайте спокій.",
                    area
                ),
                image: self.all_clear_image.clone(),
            }),
            Transition::Unchanged | Transition::Initialized(_) => None,
        }
    }

    pub fn commemoration(&self) -> NotificationIntent {
        NotificationIntent {
            kind: NotificationKind::DailyCommemoration,
            caption: "🇺🇦 <b>ХВИЛИНА МОВЧАННЯ</b> 🇺🇦\n\nЩоденно вшановуємо пам'ять українців, які загинули внаслідок збройної агресії Російської Федерації.".to_string(),
            image: self.commemoration_image.clone(),
        }
    }
}
