//! Screen navigation as an explicit transition table.
//!
//! Presentation code asks [`navigate`] where an action leads instead of
//! resolving controllers by type. A transition may require a role; the
//! first entry whose source, action and role requirement match wins.

use crate::session::Role;

/// Every screen the presentation layer can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Login,
    Signup,
    Home,
    Cart,
    Orders,
    Admin,
}

impl Screen {
    /// Window title for the screen.
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Login",
            Screen::Signup => "Sign Up",
            Screen::Home => "Dashboard",
            Screen::Cart => "Cart",
            Screen::Orders => "Orders",
            Screen::Admin => "Admin Dashboard",
        }
    }
}

/// User intents that move between screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    OpenSignup,
    SignedUp,
    LoggedIn,
    ViewCart,
    ViewOrders,
    Back,
    Logout,
}

struct Transition {
    from: Screen,
    action: NavAction,
    to: Screen,
    requires: Option<Role>,
}

const fn t(from: Screen, action: NavAction, to: Screen, requires: Option<Role>) -> Transition {
    Transition {
        from,
        action,
        to,
        requires,
    }
}

const TRANSITIONS: &[Transition] = &[
    t(Screen::Login, NavAction::OpenSignup, Screen::Signup, None),
    t(Screen::Signup, NavAction::SignedUp, Screen::Login, None),
    t(Screen::Signup, NavAction::Back, Screen::Login, None),
    t(Screen::Login, NavAction::LoggedIn, Screen::Admin, Some(Role::Admin)),
    t(Screen::Login, NavAction::LoggedIn, Screen::Home, Some(Role::Customer)),
    t(Screen::Home, NavAction::ViewCart, Screen::Cart, Some(Role::Customer)),
    t(Screen::Home, NavAction::ViewOrders, Screen::Orders, Some(Role::Customer)),
    t(Screen::Cart, NavAction::Back, Screen::Home, Some(Role::Customer)),
    t(Screen::Orders, NavAction::Back, Screen::Home, Some(Role::Customer)),
    t(Screen::Home, NavAction::Logout, Screen::Login, None),
    t(Screen::Admin, NavAction::Logout, Screen::Login, None),
];

/// Where `action` leads from `from` for a session with `role`.
///
/// `None` means the move is not allowed.
pub fn navigate(from: Screen, action: NavAction, role: Option<Role>) -> Option<Screen> {
    TRANSITIONS
        .iter()
        .find(|tr| {
            tr.from == from
                && tr.action == action
                && tr.requires.map_or(true, |required| role == Some(required))
        })
        .map(|tr| tr.to)
}

/// Tracks the current screen.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Screen,
}

impl Navigator {
    /// Start at the login screen.
    pub fn new() -> Self {
        Self {
            current: Screen::Login,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Apply `action`; on an unknown move the screen stays put and `None`
    /// is returned.
    pub fn apply(&mut self, action: NavAction, role: Option<Role>) -> Option<Screen> {
        let next = navigate(self.current, action, role)?;
        self.current = next;
        Some(next)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_routes_by_role() {
        assert_eq!(
            navigate(Screen::Login, NavAction::LoggedIn, Some(Role::Admin)),
            Some(Screen::Admin)
        );
        assert_eq!(
            navigate(Screen::Login, NavAction::LoggedIn, Some(Role::Customer)),
            Some(Screen::Home)
        );
        assert_eq!(navigate(Screen::Login, NavAction::LoggedIn, None), None);
    }

    #[test]
    fn test_customer_screens_need_a_customer() {
        assert_eq!(
            navigate(Screen::Home, NavAction::ViewCart, Some(Role::Admin)),
            None
        );
        assert_eq!(navigate(Screen::Home, NavAction::ViewCart, None), None);
    }

    #[test]
    fn test_navigator_walkthrough() {
        let mut nav = Navigator::new();
        let role = Some(Role::Customer);
        assert_eq!(nav.apply(NavAction::LoggedIn, role), Some(Screen::Home));
        assert_eq!(nav.apply(NavAction::ViewCart, role), Some(Screen::Cart));
        assert_eq!(nav.apply(NavAction::ViewOrders, role), None);
        assert_eq!(nav.current(), Screen::Cart);
        assert_eq!(nav.apply(NavAction::Back, role), Some(Screen::Home));
        assert_eq!(nav.apply(NavAction::Logout, role), Some(Screen::Login));
        assert_eq!(nav.current().title(), "Login");
    }
}
