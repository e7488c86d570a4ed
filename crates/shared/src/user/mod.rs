use serde::Deserialize;
use strum::Display;

#[derive(Display, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Role {
    Parent,
    #[default]
    Child,
}

/// Identity claims attached to the caller's token.
///
/// Parents are identified by `user_id`, children by `child_id`.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Claims {
    #[serde(default)]
    pub parent: bool,
    pub user_id: Option<String>,
    pub child_id: Option<String>,
}

impl Claims {
    pub fn parent(user_id: impl Into<String>) -> Self {
        Self {
            parent: true,
            user_id: Some(user_id.into()),
            child_id: None,
        }
    }

    pub fn child(child_id: impl Into<String>) -> Self {
        Self {
            parent: false,
            user_id: None,
            child_id: Some(child_id.into()),
        }
    }

    pub fn role(&self) -> Role {
        if self.parent { Role::Parent } else { Role::Child }
    }

    pub fn member_id(&self) -> crate::Result<String> {
        let id = if self.parent {
            self.user_id.to_owned()
        } else {
            self.child_id.to_owned()
        };

        match id {
            Some(id) if !id.is_empty() => Ok(id),
            _ => crate::bail!("Member not found in claims"),
        }
    }

    /// Administrative operations on a meal plan are reserved to parents.
    pub fn require_parent(&self) -> crate::Result<String> {
        if !self.parent {
            return Err(crate::Error::Forbidden);
        }

        self.member_id()
    }
}
