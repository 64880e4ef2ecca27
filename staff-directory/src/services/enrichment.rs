//! Branch-name decoration of the user listing.
//!
//! Branch names are cosmetic: if the branch listing cannot be loaded every
//! user is returned with `branch_name: null` and the request still succeeds.

use super::backend_client::BackendClient;
use crate::models::{BranchLookup, UserRecord, UserView};

pub async fn with_branch_names(backend: &BackendClient, users: Vec<UserRecord>) -> Vec<UserView> {
    let lookup = branch_lookup(backend).await;
    decorate(users, &lookup)
}

pub fn decorate(users: Vec<UserRecord>, lookup: &BranchLookup) -> Vec<UserView> {
    users
        .into_iter()
        .map(|user| {
            let branch_name = lookup.name_of(user.branch_id.as_deref());
            UserView::new(user, branch_name)
        })
        .collect()
}

async fn branch_lookup(backend: &BackendClient) -> BranchLookup {
    match backend.list_branches().await {
        Ok(branches) => {
            let lookup: BranchLookup = branches.into_iter().collect();
            tracing::debug!(branches = lookup.len(), "Loaded branch names");
            lookup
        }
        Err(e) => {
            tracing::warn!(error = %e, "Branch listing unavailable, omitting branch names");
            BranchLookup::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Branch;

    fn user(id: &str, role: &str, branch_id: Option<&str>) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            username: None,
            email: None,
            full_name: None,
            role: Some(role.to_string()),
            receives_transportation: None,
            created_at: Some("2024-01-01T00:00:00+00:00".to_string()),
            branch_id: branch_id.map(str::to_string),
        }
    }

    #[test]
    fn empty_lookup_leaves_every_name_null() {
        let views = decorate(
            vec![user("a", "staff", Some("b1")), user("b", "staff", None)],
            &BranchLookup::default(),
        );
        assert!(views.iter().all(|v| v.branch_name.is_none()));
    }

    #[test]
    fn decorates_and_normalizes_in_order() {
        let lookup: BranchLookup = vec![Branch {
            id: "b1".to_string(),
            name: "Main".to_string(),
        }]
        .into_iter()
        .collect();

        let views = decorate(
            vec![
                user("a", "night_manager", Some("b1")),
                user("b", "staff", Some("missing")),
            ],
            &lookup,
        );

        assert_eq!(views[0].user.id, "a");
        assert_eq!(views[0].user.role.as_deref(), Some("rider_incharge"));
        assert_eq!(views[0].branch_name.as_deref(), Some("Main"));
        assert_eq!(views[1].branch_name, None);
    }
}
