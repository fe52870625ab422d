//! User entity.

use serde::{Deserialize, Serialize};

/// Role of a resident within the neighbourhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Ordinary resident.
    Resident,
    /// Forum administrator.
    Admin,
    /// Head of an RT.
    RtHead,
    /// Head of an RW.
    RwHead,
}

impl UserRole {
    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resident => "resident",
            Self::Admin => "admin",
            Self::RtHead => "rt_head",
            Self::RwHead => "rw_head",
        }
    }

    /// Badge shown next to the user's name. Residents have none.
    #[must_use]
    pub const fn badge(self) -> Option<&'static str> {
        match self {
            Self::Resident => None,
            Self::Admin => Some("Admin"),
            Self::RtHead => Some("Ketua RT"),
            Self::RwHead => Some("Ketua RW"),
        }
    }
}

/// A registered resident.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: String,

    /// Display name.
    pub name: String,

    pub email: String,

    /// House number, e.g. `A-15`.
    pub house_number: String,

    /// RT code (opaque).
    pub rt: String,

    /// RW code (opaque).
    pub rw: String,

    pub role: UserRole,
}

impl Model {
    /// Whether the given credentials identify this user.
    ///
    /// Both fields are compared case-insensitively and must match together.
    #[must_use]
    pub fn matches_credentials(&self, email: &str, house_number: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
            && self.house_number.to_lowercase() == house_number.to_lowercase()
    }
}
