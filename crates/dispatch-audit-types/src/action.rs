//! Activity log actions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Action tags recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActivityAction {
    UserCreated,
    UserUpdated,
    UserDeactivated,
}

impl ActivityAction {
    /// Kind of record the action applies to.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::UserCreated | Self::UserUpdated | Self::UserDeactivated => "user",
        }
    }

    /// Past-tense verb used when rendering descriptions.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::UserCreated => "created",
            Self::UserUpdated => "updated",
            Self::UserDeactivated => "deactivated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_action_tags() {
        assert_eq!(ActivityAction::UserCreated.to_string(), "user_created");
        assert_eq!(ActivityAction::UserUpdated.to_string(), "user_updated");
        assert_eq!(ActivityAction::UserDeactivated.to_string(), "user_deactivated");
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(
            ActivityAction::from_str("user_deactivated").unwrap(),
            ActivityAction::UserDeactivated
        );
        assert!(ActivityAction::from_str("user_deleted").is_err());
    }

    #[test]
    fn test_action_serde_matches_display() {
        let json = serde_json::to_string(&ActivityAction::UserUpdated).unwrap();
        assert_eq!(json, "\"user_updated\"");
    }
}
