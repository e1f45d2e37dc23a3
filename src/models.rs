pub type PackageName = String;

/// A dependency mapped to its GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRepository {
    pub package: PackageName,
    pub owner: String,
    pub name: String,
}

impl ResolvedRepository {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// A dependency the registry could not map to a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub package: PackageName,
    pub reason: String,
}

/// Outcome of the registry lookup, in request order
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub resolved: Vec<ResolvedRepository>,
    pub unresolved: Vec<Unresolved>,
}

/// Star status of one resolved repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryStatus {
    pub repository: ResolvedRepository,
    /// Alias the repository was queried under
    pub alias: String,
    /// GraphQL node id, used as the `starrableId`
    pub id: String,
    pub viewer_has_starred: bool,
}
