//! Member entity definitions

use serde::{Deserialize, Serialize};

/// A person tracked by the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub email: String,
}

impl NewMember {
    pub fn into_member(self, id: i64) -> Member {
        Member {
            id,
            name: self.name,
            email: self.email,
        }
    }
}
