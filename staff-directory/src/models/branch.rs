use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    pub id: String,
    pub name: String,
}

impl Branch {
    pub const COLUMNS: &'static str = "id,name";
}

/// Branch id to display name, rebuilt for every request.
#[derive(Debug, Default)]
pub struct BranchLookup(HashMap<String, String>);

impl BranchLookup {
    pub fn name_of(&self, branch_id: Option<&str>) -> Option<String> {
        branch_id.and_then(|id| self.0.get(id)).cloned()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Branch> for BranchLookup {
    fn from_iter<I: IntoIterator<Item = Branch>>(iter: I) -> Self {
        Self(iter.into_iter().map(|b| (b.id, b.name)).collect())
    }
}
