use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use thiserror::Error;

/// Caller identity threaded through every order lifecycle operation.
///
/// The core trusts this value completely; authentication and role gating
/// happen before it is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    /// Tenant (restaurant) every read and write is scoped to.
    pub tenant_id: i32,
    /// Staff member performing the operation.
    pub user_id: i32,
    /// Roles granted to the staff member.
    pub roles: Vec<String>,
}

impl TenantContext {
    pub fn new(tenant_id: i32, user_id: i32) -> Self {
        Self {
            tenant_id,
            user_id,
            roles: Vec::new(),
        }
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` when at least one of `allowed` is granted.
    pub fn has_any_role(&self, allowed: &[&str]) -> bool {
        allowed.iter().any(|role| check_role(role, &self.roles))
    }
}

/// The authenticated principal does not carry a numeric user identifier.
#[derive(Debug, Error)]
#[error("invalid user identifier `{0}`")]
pub struct InvalidSubject(pub String);

impl TryFrom<&AuthenticatedUser> for TenantContext {
    type Error = InvalidSubject;

    fn try_from(user: &AuthenticatedUser) -> Result<Self, Self::Error> {
        let user_id = user
            .sub
            .trim()
            .parse::<i32>()
            .map_err(|_| InvalidSubject(user.sub.clone()))?;

        Ok(TenantContext::new(user.hub_id, user_id).with_roles(user.roles.iter().cloned()))
    }
}
