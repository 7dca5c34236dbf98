//! Assignment table: user name → set of role names held.
//!
//! The invariant "every assigned role is currently declared" is enforced at
//! grant time by the service (which can see the role directory); when a role
//! is deleted the service sweeps it out of every set via [`AssignmentTable::purge_role`].

use std::collections::{HashMap, HashSet};

/// In-memory assignment relation.
#[derive(Debug, Default)]
pub struct AssignmentTable {
    by_user: HashMap<String, HashSet<String>>,
}

impl AssignmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `user` holds `role`. Idempotent: granting an already-held
    /// role changes nothing. Preconditions (verified user, declared role) are
    /// the caller's responsibility.
    pub fn grant(&mut self, user: &str, role: &str) {
        self.by_user
            .entry(user.to_string())
            .or_default()
            .insert(role.to_string());
    }

    /// The current role set for a user. Unknown users hold the empty set;
    /// that is not an error.
    pub fn roles_of(&self, user: &str) -> HashSet<String> {
        self.by_user.get(user).cloned().unwrap_or_default()
    }

    pub fn holds(&self, user: &str, role: &str) -> bool {
        self.by_user.get(user).is_some_and(|roles| roles.contains(role))
    }

    /// Remove `role` from every user's set (role-deletion cascade).
    pub fn purge_role(&mut self, role: &str) {
        for roles in self.by_user.values_mut() {
            roles.remove(role);
        }
    }

    /// Drop a user's entire entry (user-deletion cascade).
    pub fn remove_user(&mut self, user: &str) {
        self.by_user.remove(user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_user_holds_the_empty_set() {
        let table = AssignmentTable::new();
        assert!(table.roles_of("nobody").is_empty());
        assert!(!table.holds("nobody", "admin"));
    }

    #[test]
    fn grant_is_idempotent() {
        let mut table = AssignmentTable::new();
        table.grant("alice", "admin");
        table.grant("alice", "admin");
        assert_eq!(table.roles_of("alice").len(), 1);
        assert!(table.holds("alice", "admin"));
    }

    #[test]
    fn purge_role_sweeps_every_user() {
        let mut table = AssignmentTable::new();
        table.grant("alice", "admin");
        table.grant("alice", "auditor");
        table.grant("bob", "admin");

        table.purge_role("admin");

        assert!(!table.holds("alice", "admin"));
        assert!(!table.holds("bob", "admin"));
        assert!(table.holds("alice", "auditor"));
    }

    #[test]
    fn remove_user_drops_the_whole_entry() {
        let mut table = AssignmentTable::new();
        table.grant("alice", "admin");
        table.remove_user("alice");
        assert!(table.roles_of("alice").is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a second grant of the same pair never changes the
            /// cardinality of the user's role set.
            #[test]
            fn double_grant_leaves_cardinality_unchanged(
                user in "[a-z]{1,12}",
                role in "[a-z]{1,12}",
            ) {
                let mut table = AssignmentTable::new();
                table.grant(&user, &role);
                let after_first = table.roles_of(&user).len();
                table.grant(&user, &role);
                prop_assert_eq!(table.roles_of(&user).len(), after_first);
            }
        }
    }
}
