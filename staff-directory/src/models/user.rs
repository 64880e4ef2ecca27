use serde::{Deserialize, Serialize};

use super::role::{normalize_role, CallerRole};

/// Subset of the identity provider's "current user" payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub id: Option<String>,
}

impl CurrentUser {
    /// Subject id, if the payload actually carries one.
    pub fn subject(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// The caller's own profile row, looked up with the privileged key.
#[derive(Debug, Clone, Deserialize)]
pub struct CallerProfile {
    pub id: String,
    pub role: String,
    #[serde(default)]
    pub branch_id: Option<String>,
}

impl CallerProfile {
    pub fn caller_role(&self) -> CallerRole {
        CallerRole::parse(&self.role)
    }
}

/// A row of the user listing.
///
/// Passed through to the client as the upstream sent it; only `role` is
/// rewritten. `created_at` stays the upstream's text so its format survives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub receives_transportation: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub branch_id: Option<String>,
}

impl UserRecord {
    pub const COLUMNS: &'static str =
        "id,username,email,full_name,role,receives_transportation,created_at,branch_id";
}

/// A user record as returned to the client: display role plus resolved branch name.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    #[serde(flatten)]
    pub user: UserRecord,
    pub branch_name: Option<String>,
}

impl UserView {
    pub fn new(mut user: UserRecord, branch_name: Option<String>) -> Self {
        if let Some(role) = user.role.as_deref() {
            user.role = Some(normalize_role(role).to_string());
        }
        Self { user, branch_name }
    }
}

/// Which part of the user listing a caller may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserScope {
    /// Every user, global admins included.
    All,
    /// Users of one branch, never global admins.
    Branch(String),
}

impl UserScope {
    /// Row filters in the upstream's `column=op.value` syntax.
    pub fn filters(&self) -> Vec<(&'static str, String)> {
        match self {
            UserScope::All => Vec::new(),
            UserScope::Branch(branch_id) => vec![
                ("branch_id", format!("eq.{}", branch_id)),
                ("role", format!("neq.{}", CallerRole::ADMIN)),
            ],
        }
    }

    pub fn permits(&self, user: &UserRecord) -> bool {
        match self {
            UserScope::All => true,
            UserScope::Branch(branch_id) => {
                user.branch_id.as_deref() == Some(branch_id.as_str())
                    && user.role.as_deref() != Some(CallerRole::ADMIN)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(role: &str, branch_id: Option<&str>) -> UserRecord {
        record_with(Some(role), branch_id)
    }

    fn record_with(role: Option<&str>, branch_id: Option<&str>) -> UserRecord {
        UserRecord {
            id: "u1".to_string(),
            username: Some("jdoe".to_string()),
            email: Some("jdoe@example.com".to_string()),
            full_name: None,
            role: role.map(str::to_string),
            receives_transportation: Some(true),
            created_at: Some("2024-03-01T08:00:00+00:00".to_string()),
            branch_id: branch_id.map(str::to_string),
        }
    }

    #[test]
    fn view_rewrites_legacy_role_and_keeps_null_branch_name() {
        let view = UserView::new(record("night_manager", None), None);
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["role"], "rider_incharge");
        assert!(value.as_object().unwrap().contains_key("branch_name"));
        assert!(value["branch_name"].is_null());
        assert_eq!(value["username"], "jdoe");
    }

    #[test]
    fn view_keeps_null_role_and_upstream_timestamp() {
        let view = UserView::new(record_with(None, Some("b1")), Some("Main".to_string()));
        let value = serde_json::to_value(&view).unwrap();

        assert!(value["role"].is_null());
        assert_eq!(value["created_at"], "2024-03-01T08:00:00+00:00");
        assert_eq!(value["branch_name"], "Main");
    }

    #[test]
    fn sparse_rows_decode() {
        let row: UserRecord = serde_json::from_value(json!({
            "id": "u9",
            "role": null,
            "created_at": "2024-05-02 09:00:00",
        }))
        .unwrap();

        assert_eq!(row.role, None);
        assert_eq!(row.created_at.as_deref(), Some("2024-05-02 09:00:00"));
        assert_eq!(row.branch_id, None);
    }

    #[test]
    fn current_user_without_id_has_no_subject() {
        let user: CurrentUser = serde_json::from_value(json!({ "email": "a@b.c" })).unwrap();
        assert_eq!(user.subject(), None);

        let user: CurrentUser = serde_json::from_value(json!({ "id": "" })).unwrap();
        assert_eq!(user.subject(), None);
    }

    #[test]
    fn branch_scope_filters_and_permits() {
        let scope = UserScope::Branch("b1".to_string());
        assert_eq!(
            scope.filters(),
            vec![
                ("branch_id", "eq.b1".to_string()),
                ("role", "neq.admin".to_string())
            ]
        );
        assert!(scope.permits(&record("staff", Some("b1"))));
        assert!(!scope.permits(&record("staff", Some("b2"))));
        assert!(!scope.permits(&record("admin", Some("b1"))));
        assert!(!scope.permits(&record("staff", None)));
        assert!(scope.permits(&record_with(None, Some("b1"))));
    }

    #[test]
    fn global_scope_has_no_filters() {
        assert!(UserScope::All.filters().is_empty());
        assert!(UserScope::All.permits(&record("admin", None)));
    }
}
