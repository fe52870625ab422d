//! Role checks of the presentation layer.

use forum_warga_db::entities::UserRole;

/// Whether `role` may see who voted on a poll.
///
/// Residents vote but cannot read the roster.
#[must_use]
pub const fn can_view_roster(role: UserRole) -> bool {
    match role {
        UserRole::Admin | UserRole::RtHead | UserRole::RwHead => true,
        UserRole::Resident => false,
    }
}
