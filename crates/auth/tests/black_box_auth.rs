//! Black-box exercise of the public contract, end to end.
//!
//! Everything here goes through the exported API only — no reaching into
//! internals — the way an embedding application would drive the service.

use std::collections::HashSet;

use gatehouse_auth::{wire, AuthService, Credentials, RoleCheck};

#[test]
fn full_lifecycle_scenario() {
    let service = AuthService::new();

    // Provision a user and a role, then bind them.
    assert!(service.create_user("u0", "p0"));
    assert!(service.create_role("r0"));
    assert!(service.grant_role(&Credentials::new("u0", "p0"), "r0"));

    // Authenticate and query through the token.
    let token = service.authenticate("u0", "p0");
    assert_ne!(token, wire::ERROR);

    assert_eq!(service.check_role(&token, "r0"), RoleCheck::Granted);
    assert_eq!(service.check_role(&token, "r1"), RoleCheck::Denied);
    assert_eq!(service.check_role("garbage", "r0"), RoleCheck::Invalid);

    assert_eq!(service.roles_for(&token), HashSet::from(["r0".to_string()]));

    // Revoke and observe the collapse to "invalid".
    assert!(service.invalidate(&token));
    assert!(!service.invalidate(&token));
    assert_eq!(service.check_role(&token, "r0"), RoleCheck::Invalid);
    assert_eq!(
        service.roles_for(&token),
        HashSet::from([wire::ERROR.to_string()])
    );
}

#[test]
fn role_deletion_is_visible_through_live_tokens() {
    let service = AuthService::new();
    service.create_user("u0", "p0");
    service.create_role("r0");
    service.grant_role(&Credentials::new("u0", "p0"), "r0");

    let token = service.authenticate("u0", "p0");
    assert_eq!(service.check_role(&token, "r0"), RoleCheck::Granted);

    assert!(service.delete_role("r0"));

    // The token is still valid; only the role membership changed.
    assert!(service.is_active(&token));
    assert_eq!(service.check_role(&token, "r0"), RoleCheck::Denied);
    assert!(service.roles_for(&token).is_empty());
}

#[test]
fn services_are_isolated_contexts() {
    let a = AuthService::new();
    let b = AuthService::new();

    a.create_user("u0", "p0");
    let token = a.authenticate("u0", "p0");

    // A token minted by one context means nothing to another.
    assert!(a.is_active(&token));
    assert!(!b.is_active(&token));
    assert_eq!(b.check_role(&token, "r0"), RoleCheck::Invalid);
}

#[test]
fn concurrent_grants_do_not_lose_updates() {
    let service = std::sync::Arc::new(AuthService::new());
    service.create_user("u0", "p0");
    for i in 0..8 {
        service.create_role(&format!("r{i}"));
    }

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = std::sync::Arc::clone(&service);
            std::thread::spawn(move || {
                let creds = Credentials::new("u0", "p0");
                assert!(service.grant_role(&creds, &format!("r{i}")));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(service.user_roles("u0").len(), 8);
}
