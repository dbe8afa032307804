use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{closed_enum, Record, ResourceKind, UserId};

closed_enum!(UserRole {
    Viewer => "viewer",
    Author => "author",
    Editor => "editor",
    Admin => "admin",
});

closed_enum!(UserStatus {
    Active => "active",
    Invited => "invited",
    Suspended => "suspended",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Username,
    Email,
    FullName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    pub role: UserRole,
    pub status: UserStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub status: UserStatus,
}

impl Record for User {
    type Id = UserId;
    type Category = UserRole;
    type Status = UserStatus;
    type Field = UserField;
    type Draft = UserDraft;

    const KIND: ResourceKind = ResourceKind::Users;
    const DEFAULT_SEARCH_FIELDS: &'static [UserField] =
        &[UserField::Username, UserField::Email, UserField::FullName];

    fn id(&self) -> &UserId {
        &self.id
    }

    fn field_text(&self, field: UserField) -> Option<&str> {
        match field {
            UserField::Username => Some(self.username.as_str()),
            UserField::Email => Some(self.email.as_str()),
            UserField::FullName => Some(self.full_name.as_str()),
        }
    }

    fn category(&self) -> Option<UserRole> {
        Some(self.role)
    }

    fn status(&self) -> Option<UserStatus> {
        Some(self.status)
    }

    fn to_draft(&self) -> UserDraft {
        UserDraft {
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            role: self.role,
            status: self.status,
        }
    }

    fn title(&self) -> String {
        if self.full_name.is_empty() {
            self.username.clone()
        } else {
            format!("{} ({})", self.full_name, self.username)
        }
    }
}
