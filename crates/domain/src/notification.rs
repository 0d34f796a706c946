use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    Email,
    Push,
}

impl NotificationChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Push => "push",
        }
    }
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::Email
    }
}

impl std::fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationChannel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "push" => Ok(Self::Push),
            _ => Err(anyhow::Error::msg(format!(
                "Invalid notification channel: {}",
                s
            ))),
        }
    }
}

/// Whether a `User` wants notifications on a given channel.
/// Users without a stored preference are opted in.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationPreference {
    pub user_id: ID,
    pub channel: NotificationChannel,
    pub enabled: bool,
}
