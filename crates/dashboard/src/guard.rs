use crate::error::DashboardError;
use core_types::SessionUser;
use events::Route;
use notifier::Navigator;

/// The access precondition a view declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRule {
    /// Login and registration: only for visitors without a session.
    AnonymousOnly,
    /// The strategy dashboard: any authenticated non-admin.
    User,
    /// The admin panel.
    Admin,
}

/// Returns `Err(route)` with the redirect target when `session` violates `rule`.
pub fn check_access(rule: AccessRule, session: Option<&SessionUser>) -> Result<(), Route> {
    match (rule, session) {
        (AccessRule::AnonymousOnly, None) => Ok(()),
        (AccessRule::AnonymousOnly, Some(user)) if user.is_admin() => Err(Route::Admin),
        (AccessRule::AnonymousOnly, Some(_)) => Err(Route::Dashboard),

        (AccessRule::User | AccessRule::Admin, None) => Err(Route::Login),
        (AccessRule::User, Some(user)) if user.is_admin() => Err(Route::Admin),
        (AccessRule::User, Some(_)) => Ok(()),
        (AccessRule::Admin, Some(user)) if user.is_admin() => Ok(()),
        (AccessRule::Admin, Some(_)) => Err(Route::Dashboard),
    }
}

/// `check_access`, handing any redirect to `navigator`. Returns whether access is granted.
pub fn enforce(rule: AccessRule, session: Option<&SessionUser>, navigator: &dyn Navigator) -> bool {
    match check_access(rule, session) {
        Ok(()) => true,
        Err(route) => {
            tracing::info!(?rule, route = %route, "Access denied, redirecting.");
            navigator.redirect(route);
            false
        }
    }
}

/// Admits the authenticated viewer of a dashboard, or redirects and fails.
pub(crate) fn admit(
    rule: AccessRule,
    session: Option<&SessionUser>,
    navigator: &dyn Navigator,
) -> Result<SessionUser, DashboardError> {
    match (check_access(rule, session), session) {
        (Ok(()), Some(viewer)) => Ok(viewer.clone()),
        (result, _) => {
            let route = result.err().unwrap_or(Route::Login);
            navigator.redirect(route);
            Err(DashboardError::AccessDenied(route))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Role;
    use notifier::RecordingNavigator;

    fn user() -> SessionUser {
        SessionUser::new(1, "muser", Role::User)
    }

    fn admin() -> SessionUser {
        SessionUser::new(2, "mvc", Role::Admin)
    }

    #[test]
    fn test_user_dashboard_rules() {
        assert_eq!(check_access(AccessRule::User, None), Err(Route::Login));
        assert_eq!(check_access(AccessRule::User, Some(&admin())), Err(Route::Admin));
        assert_eq!(check_access(AccessRule::User, Some(&user())), Ok(()));
    }

    #[test]
    fn test_admin_panel_rules() {
        assert_eq!(check_access(AccessRule::Admin, None), Err(Route::Login));
        assert_eq!(check_access(AccessRule::Admin, Some(&user())), Err(Route::Dashboard));
        assert_eq!(check_access(AccessRule::Admin, Some(&admin())), Ok(()));
    }

    #[test]
    fn test_auth_pages_rules() {
        assert_eq!(check_access(AccessRule::AnonymousOnly, None), Ok(()));
        assert_eq!(check_access(AccessRule::AnonymousOnly, Some(&user())), Err(Route::Dashboard));
        assert_eq!(check_access(AccessRule::AnonymousOnly, Some(&admin())), Err(Route::Admin));
    }

    #[test]
    fn test_enforce_redirects_only_on_violation() {
        let navigator = RecordingNavigator::new();
        assert!(enforce(AccessRule::User, Some(&user()), &navigator));
        assert!(navigator.redirects().is_empty());

        assert!(!enforce(AccessRule::Admin, Some(&user()), &navigator));
        assert_eq!(navigator.redirects(), vec![Route::Dashboard]);
    }
}
