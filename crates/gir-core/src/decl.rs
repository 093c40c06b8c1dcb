use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeclKind {
    Function,
    DataConstructor,
    Projection,
    Postulate,
}

/// Canonical key for a declaration across all translation tables.
///
/// Two declarations that share a name but differ in kind are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclRef {
    pub name: String,
    pub kind: DeclKind,
}

impl DeclRef {
    pub fn new(name: impl Into<String>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn function(name: impl Into<String>) -> Self {
        Self::new(name, DeclKind::Function)
    }
}

impl std::fmt::Display for DeclRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
