use crate::error::ApiError;
use uuid::Uuid;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Uuid,
    pub role: Option<String>,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    Owner,
    Organizer,
    Admin,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AccessFacts {
    pub owner: Option<Uuid>,
    pub organizer: Option<Uuid>,
}

impl AccessFacts {
    pub fn holds(&self, caller: &Caller, relationship: Relationship) -> bool {
        match relationship {
            Relationship::Owner => self.owner == Some(caller.user_id),
            Relationship::Organizer => self.organizer == Some(caller.user_id),
            Relationship::Admin => caller.is_admin(),
        }
    }
}

pub fn authorize(caller: &Caller, facts: &AccessFacts, allowed: &[Relationship]) -> Result<(), ApiError> {
    if allowed.iter().any(|r| facts.holds(caller, *r)) {
        Ok(())
    } else {
        Err(ApiError::forbidden())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_allow_list_denies_everyone() {
        let caller = Caller {
            user_id: Uuid::new_v4(),
            role: Some(ADMIN_ROLE.to_string()),
        };
        assert!(authorize(&caller, &AccessFacts::default(), &[]).is_err());
    }

    #[test]
    fn role_match_is_exact() {
        let caller = Caller {
            user_id: Uuid::new_v4(),
            role: Some("Admin".to_string()),
        };
        assert!(!caller.is_admin());
    }
}
