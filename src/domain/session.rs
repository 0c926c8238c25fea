use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tenant,
    Owner,
}

impl Role {
    /// URL segment under `/dashboard/`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tenant => "tenant",
            Self::Owner => "owner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tenant" => Ok(Self::Tenant),
            "owner" => Ok(Self::Owner),
            other => Err(ExplorerError::InvalidInput {
                reason: format!("unknown role '{other}'"),
            }),
        }
    }
}

/// Profile handed over by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
}

/// Current-user context, passed explicitly to whatever needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    profile: Option<UserProfile>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(profile: UserProfile) -> Self {
        Self {
            profile: Some(profile),
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().map(|p| p.role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardRoute {
    /// Profile or route segment not known yet; show the loading state.
    Pending,
    Redirect { to: String },
    Render(Role),
}

pub fn dashboard_path(role: Role) -> String {
    format!("/dashboard/{role}")
}

/// Where a freshly signed-in user lands.
pub fn post_login_path(profile: &UserProfile) -> String {
    dashboard_path(profile.role)
}

/// Route-entry guard for `/dashboard/:role`. The segment is compared as a
/// raw string, so an unknown segment redirects like a mismatched one.
pub fn resolve_dashboard(session: &Session, requested: Option<&str>) -> DashboardRoute {
    let (Some(profile), Some(segment)) = (session.profile(), requested) else {
        return DashboardRoute::Pending;
    };
    if segment == profile.role.as_str() {
        DashboardRoute::Render(profile.role)
    } else {
        tracing::debug!(
            requested = segment,
            role = %profile.role,
            "Dashboard role mismatch, redirecting"
        );
        DashboardRoute::Redirect {
            to: post_login_path(profile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> UserProfile {
        UserProfile {
            id: "u1".into(),
            name: "Maria Garcia".into(),
            email: "maria.garcia@email.com".into(),
            role: Role::Owner,
        }
    }

    #[test]
    fn anonymous_session_is_pending() {
        assert_eq!(
            resolve_dashboard(&Session::anonymous(), Some("owner")),
            DashboardRoute::Pending
        );
    }

    #[test]
    fn missing_segment_is_pending() {
        let session = Session::signed_in(owner());
        assert_eq!(resolve_dashboard(&session, None), DashboardRoute::Pending);
    }

    #[test]
    fn matching_segment_renders() {
        let session = Session::signed_in(owner());
        assert_eq!(
            resolve_dashboard(&session, Some("owner")),
            DashboardRoute::Render(Role::Owner)
        );
    }

    #[test]
    fn mismatched_segment_redirects() {
        let session = Session::signed_in(owner());
        assert_eq!(
            resolve_dashboard(&session, Some("tenant")),
            DashboardRoute::Redirect {
                to: "/dashboard/owner".into()
            }
        );
    }

    #[test]
    fn unknown_segment_redirects() {
        let session = Session::signed_in(owner());
        assert!(matches!(
            resolve_dashboard(&session, Some("admin")),
            DashboardRoute::Redirect { .. }
        ));
    }

    #[test]
    fn post_login_goes_to_role_dashboard() {
        assert_eq!(post_login_path(&owner()), "/dashboard/owner");
    }

    #[test]
    fn role_parse_roundtrip() {
        assert_eq!("tenant".parse::<Role>().unwrap(), Role::Tenant);
        assert!("landlord".parse::<Role>().is_err());
    }

    #[test]
    fn profile_deserializes_from_yaml() {
        let yaml = "id: u7\nname: Sam\nrole: tenant\n";
        let profile: UserProfile = serde_yml::from_str(yaml).unwrap();
        assert_eq!(profile.role, Role::Tenant);
        assert!(profile.email.is_empty());
    }
}
