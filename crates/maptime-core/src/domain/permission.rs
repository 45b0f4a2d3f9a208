//! Issuer roles and the `/limit` permission policy.
//!
//! Servers know three privileged tiers.  Master admins are configured in the
//! server controller itself and can always edit limits.  The two lower tiers
//! are gated by flags stored alongside the overrides, so an operator can be
//! granted or denied access by editing the store file.

/// The privilege tier of a player issuing a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Top-level authority; never gated.
    MasterAdmin,
    /// Gated by `allow_admins`.
    Admin,
    /// Gated by `allow_operators`.
    Operator,
    /// Everyone else.
    Player,
}

/// Which gated tiers may edit limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    pub allow_admins: bool,
    pub allow_operators: bool,
}

impl Permissions {
    /// Returns `true` when `role` may run a `/limit` command.
    pub fn permits(&self, role: Role) -> bool {
        match role {
            Role::MasterAdmin => true,
            Role::Admin => self.allow_admins,
            Role::Operator => self.allow_operators,
            Role::Player => false,
        }
    }
}
