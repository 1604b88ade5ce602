//! The signed-in user and their role.

use boxoffice_core::User;

/// What a session is allowed to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Customer,
    Admin,
}

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub role: Role,
}

impl Session {
    pub fn customer(user: User) -> Self {
        Self {
            user,
            role: Role::Customer,
        }
    }

    /// The built-in administrator.
    pub fn admin(username: &str) -> Self {
        Self {
            user: User::new(username, "Administrator"),
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
