//! Role directory: the set of declared role names.

use std::collections::HashSet;

use crate::wire;

/// In-memory role directory.
///
/// Deleting a role must also purge it from every assignment set; that
/// cross-store cascade is composed in `AuthService::delete_role`.
#[derive(Debug, Default)]
pub struct RoleDirectory {
    names: HashSet<String>,
}

impl RoleDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a role. Returns `false` if it is already declared or the name
    /// contains the token field separator.
    pub fn create(&mut self, name: &str) -> bool {
        if name.contains(wire::SEPARATOR) {
            return false;
        }
        self.names.insert(name.to_string())
    }

    /// Remove a declared role. Returns `false` if it was never declared.
    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_is_rejected_for_duplicates() {
        let mut roles = RoleDirectory::new();
        assert!(roles.create("admin"));
        assert!(!roles.create("admin"));
        assert!(roles.exists("admin"));
    }

    #[test]
    fn remove_fails_for_undeclared_roles() {
        let mut roles = RoleDirectory::new();
        assert!(!roles.remove("admin"));
        roles.create("admin");
        assert!(roles.remove("admin"));
        assert!(!roles.exists("admin"));
        assert!(!roles.remove("admin"));
    }

    #[test]
    fn separator_bearing_names_are_rejected() {
        let mut roles = RoleDirectory::new();
        assert!(!roles.create("ad#min"));
        assert!(!roles.exists("ad#min"));
    }
}
