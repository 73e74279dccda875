//! Caller identity extracted from trusted gateway headers.
//!
//! Credential verification is delegated to the fronting auth proxy: it
//! validates the session token and forwards the resolved identity as
//! `x-user-id`, `x-user-role`, and (for staff accounts) `x-school-id`
//! headers. This module only reads those headers — a request without a
//! complete, well-formed identity is treated as unauthenticated.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::ApiError;

/// Access level forwarded by the auth proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Regular account: may manage its own reviews and votes.
    User,
    /// School staff: may additionally read their school's metrics.
    Staff,
    /// Platform admin: full moderation and dashboard access.
    Admin,
}

impl Role {
    fn from_header(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Self::User),
            "staff" => Some(Self::Staff),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    /// Account id resolved by the auth proxy.
    pub user_id: Uuid,
    /// Access level.
    pub role: Role,
    /// School the caller belongs to, for staff accounts.
    pub school_id: Option<Uuid>,
}

impl Identity {
    /// Reads the identity headers, returning `None` when the required
    /// ones are absent or malformed.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let user_id = headers
            .get("x-user-id")?
            .to_str()
            .ok()?
            .parse()
            .ok()?;
        let role = Role::from_header(headers.get("x-user-role")?.to_str().ok()?)?;
        let school_id = headers
            .get("x-school-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        Some(Self {
            user_id,
            role,
            school_id,
        })
    }

    /// Rejects callers below admin.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] for non-admin callers.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(ApiError::Forbidden("admin access required".to_string()))
        }
    }

    /// Rejects callers below staff and returns the school they may
    /// read metrics for.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] for regular callers and for
    /// staff accounts with no school assignment.
    pub fn require_staff_school(&self) -> Result<Uuid, ApiError> {
        if !matches!(self.role, Role::Staff | Role::Admin) {
            return Err(ApiError::Forbidden("staff access required".to_string()));
        }
        self.school_id
            .ok_or_else(|| ApiError::Forbidden("no school assigned".to_string()))
    }

    /// Whether the caller may act on content owned by `owner_id`:
    /// the owner themselves, or any admin.
    #[must_use]
    pub fn can_moderate(&self, owner_id: Uuid) -> bool {
        self.user_id == owner_id || self.role == Role::Admin
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers).ok_or(ApiError::Unauthorized)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(entries: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in entries {
            let Ok(name) = name.parse::<axum::http::HeaderName>() else {
                panic!("valid header name");
            };
            let Ok(value) = HeaderValue::from_str(value) else {
                panic!("valid header value");
            };
            map.insert(name, value);
        }
        map
    }

    #[test]
    fn full_identity_parses() {
        let user = Uuid::new_v4();
        let school = Uuid::new_v4();
        let map = headers(&[
            ("x-user-id", &user.to_string()),
            ("x-user-role", "staff"),
            ("x-school-id", &school.to_string()),
        ]);
        let Some(identity) = Identity::from_headers(&map) else {
            panic!("identity expected");
        };
        assert_eq!(identity.user_id, user);
        assert_eq!(identity.role, Role::Staff);
        assert_eq!(identity.school_id, Some(school));
    }

    #[test]
    fn missing_or_malformed_headers_yield_none() {
        assert!(Identity::from_headers(&HeaderMap::new()).is_none());

        let no_role = headers(&[("x-user-id", &Uuid::new_v4().to_string())]);
        assert!(Identity::from_headers(&no_role).is_none());

        let bad_role = headers(&[
            ("x-user-id", &Uuid::new_v4().to_string()),
            ("x-user-role", "superuser"),
        ]);
        assert!(Identity::from_headers(&bad_role).is_none());

        let bad_id = headers(&[("x-user-id", "not-a-uuid"), ("x-user-role", "user")]);
        assert!(Identity::from_headers(&bad_id).is_none());
    }

    #[test]
    fn role_guards() {
        let admin = Identity {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
            school_id: None,
        };
        let staff = Identity {
            user_id: Uuid::new_v4(),
            role: Role::Staff,
            school_id: Some(Uuid::new_v4()),
        };
        let user = Identity {
            user_id: Uuid::new_v4(),
            role: Role::User,
            school_id: None,
        };

        assert!(admin.require_admin().is_ok());
        assert!(staff.require_admin().is_err());
        assert!(staff.require_staff_school().is_ok());
        assert!(user.require_staff_school().is_err());

        let unassigned = Identity {
            school_id: None,
            ..staff
        };
        assert!(unassigned.require_staff_school().is_err());
    }

    #[tokio::test]
    async fn extractor_rejects_requests_without_identity() {
        let Ok(request) = axum::http::Request::builder().uri("/").body(()) else {
            panic!("valid request");
        };
        let (mut parts, ()) = request.into_parts();
        let result = Identity::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn extractor_accepts_forwarded_identity() {
        let user = Uuid::new_v4();
        let Ok(request) = axum::http::Request::builder()
            .uri("/")
            .header("x-user-id", user.to_string())
            .header("x-user-role", "admin")
            .body(())
        else {
            panic!("valid request");
        };
        let (mut parts, ()) = request.into_parts();
        let Ok(identity) = Identity::from_request_parts(&mut parts, &()).await else {
            panic!("identity expected");
        };
        assert_eq!(identity.user_id, user);
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn owners_and_admins_may_moderate() {
        let owner = Uuid::new_v4();
        let author = Identity {
            user_id: owner,
            role: Role::User,
            school_id: None,
        };
        let admin = Identity {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
            school_id: None,
        };
        let stranger = Identity {
            user_id: Uuid::new_v4(),
            role: Role::User,
            school_id: None,
        };

        assert!(author.can_moderate(owner));
        assert!(admin.can_moderate(owner));
        assert!(!stranger.can_moderate(owner));
    }
}
