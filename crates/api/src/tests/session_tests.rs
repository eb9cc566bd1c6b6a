// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::create_test_session;
use crate::{AuthError, Role, UserSession, required_role_for_path};

#[test]
fn test_anonymous_session_is_not_logged_in() {
    let session: UserSession = UserSession::anonymous();

    assert!(!session.is_logged_in());
    assert_eq!(session.bearer(), None);
}

#[test]
fn test_require_without_token_reports_not_logged_in() {
    let session: UserSession = UserSession {
        roles: vec![Role::Admin],
        ..UserSession::anonymous()
    };

    assert_eq!(
        session.require(Role::Admin, "list tenders"),
        Err(AuthError::NotLoggedIn)
    );
}

#[test]
fn test_require_rejects_missing_role() {
    let session: UserSession = create_test_session(&[Role::Contractor]);

    let result = session.require(Role::Admin, "delete tender");

    assert_eq!(
        result,
        Err(AuthError::Unauthorized {
            action: String::from("delete tender"),
            required_role: Role::Admin,
        })
    );
}

#[test]
fn test_require_accepts_held_role() {
    let session: UserSession = create_test_session(&[Role::Admin, Role::Contractor]);

    assert!(session.require(Role::Admin, "create tender").is_ok());
    assert!(session.require(Role::Contractor, "submit offer").is_ok());
    assert_eq!(session.bearer(), Some("token-123"));
}

#[test]
fn test_view_paths_map_to_roles() {
    assert_eq!(required_role_for_path("/admin/tenders"), Some(Role::Admin));
    assert_eq!(
        required_role_for_path("/contractor/offers"),
        Some(Role::Contractor)
    );
    assert_eq!(required_role_for_path("/login"), None);
}

#[test]
fn test_authorize_path_uses_route_role() {
    let contractor: UserSession = create_test_session(&[Role::Contractor]);

    assert!(contractor.authorize_path("/contractor/tenders").is_ok());
    assert!(matches!(
        contractor.authorize_path("/admin/report"),
        Err(AuthError::Unauthorized { .. })
    ));
    assert!(contractor.authorize_path("/access-denied").is_ok());
}

#[test]
fn test_role_parse_ignores_case() {
    assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
    assert_eq!(Role::parse(" Contractor "), Some(Role::Contractor));
    assert_eq!(Role::parse("Auditor"), None);
}

#[test]
fn test_clear_forgets_everything() {
    let mut session: UserSession = create_test_session(&[Role::Admin]);

    session.clear();

    assert_eq!(session, UserSession::anonymous());
}
