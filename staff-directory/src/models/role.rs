/// Legacy role names still present in storage, paired with the name shown to clients.
const ROLE_ALIASES: &[(&str, &str)] = &[("night_manager", "rider_incharge")];

/// Display name for a stored role. Unknown roles pass through untouched.
pub fn normalize_role(role: &str) -> &str {
    ROLE_ALIASES
        .iter()
        .find(|(legacy, _)| *legacy == role)
        .map(|(_, current)| *current)
        .unwrap_or(role)
}

/// Role of the caller as far as the listing policy is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerRole {
    Admin,
    BranchAdmin,
    Other(String),
}

impl CallerRole {
    pub const ADMIN: &'static str = "admin";
    pub const BRANCH_ADMIN: &'static str = "branch_admin";

    pub fn parse(role: &str) -> Self {
        match role {
            Self::ADMIN => CallerRole::Admin,
            Self::BRANCH_ADMIN => CallerRole::BranchAdmin,
            other => CallerRole::Other(other.to_string()),
        }
    }
}
