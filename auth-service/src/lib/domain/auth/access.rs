//! Role and ownership checks over a verified payload.
//!
//! Callers fetch the owning principal of a resource themselves and compare it
//! here, e.g. only the musician who owns an album may publish it.

use crate::domain::auth::errors::AccessError;
use crate::domain::auth::models::Payload;
use crate::domain::auth::models::PrincipalId;
use crate::domain::auth::models::Role;

impl Payload {
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_musician(&self) -> bool {
        self.role == Role::Musician
    }

    pub fn owns(&self, owner: &PrincipalId) -> bool {
        self.principal_id == *owner
    }
}

/// Require the payload to carry `required` role.
///
/// # Errors
/// * `WrongRole` - Payload belongs to the other kind of principal
pub fn ensure_role(payload: &Payload, required: Role) -> Result<(), AccessError> {
    if payload.role == required {
        Ok(())
    } else {
        Err(AccessError::WrongRole {
            required,
            actual: payload.role,
        })
    }
}

/// Require the payload's principal to be the owner of a resource.
///
/// # Errors
/// * `NotOwner` - Resource belongs to a different principal
pub fn ensure_owner(payload: &Payload, owner: &PrincipalId) -> Result<(), AccessError> {
    if payload.owns(owner) {
        Ok(())
    } else {
        Err(AccessError::NotOwner)
    }
}

/// Require a musician acting on a resource they own.
pub fn ensure_owning_musician(payload: &Payload, owner: &PrincipalId) -> Result<(), AccessError> {
    ensure_role(payload, Role::Musician)?;
    ensure_owner(payload, owner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_predicates() {
        let user = Payload::new(PrincipalId::new(), Role::User);
        let musician = Payload::new(PrincipalId::new(), Role::Musician);

        assert!(user.is_user());
        assert!(!user.is_musician());
        assert!(musician.is_musician());
        assert!(!musician.is_user());
    }

    #[test]
    fn test_ensure_role() {
        let user = Payload::new(PrincipalId::new(), Role::User);

        assert_eq!(ensure_role(&user, Role::User), Ok(()));
        assert_eq!(
            ensure_role(&user, Role::Musician),
            Err(AccessError::WrongRole {
                required: Role::Musician,
                actual: Role::User,
            })
        );
    }

    #[test]
    fn test_ensure_owner() {
        let owner = PrincipalId::new();
        let payload = Payload::new(owner, Role::Musician);

        assert_eq!(ensure_owner(&payload, &owner), Ok(()));
        assert_eq!(
            ensure_owner(&payload, &PrincipalId::new()),
            Err(AccessError::NotOwner)
        );
    }

    #[test]
    fn test_ensure_owning_musician() {
        let owner = PrincipalId::new();

        let musician = Payload::new(owner, Role::Musician);
        assert_eq!(ensure_owning_musician(&musician, &owner), Ok(()));

        // Same id but a user account: an id match alone is not enough
        let user = Payload::new(owner, Role::User);
        assert!(matches!(
            ensure_owning_musician(&user, &owner),
            Err(AccessError::WrongRole { .. })
        ));

        let other = Payload::new(PrincipalId::new(), Role::Musician);
        assert_eq!(
            ensure_owning_musician(&other, &owner),
            Err(AccessError::NotOwner)
        );
    }
}
