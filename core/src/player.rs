use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Goddess,
    Servant,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Goddess, Role::Servant];

    pub const fn label(self) -> &'static str {
        use Role::*;
        match self {
            Goddess => "Goddess",
            Servant => "servant",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Servant
    }
}

/// A display name made only of ASCII letters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerName(String);

impl PlayerName {
    pub const MAX_LEN: usize = 10;

    pub fn sanitize(raw: &str) -> Self {
        Self::sanitize_with_limit(raw, Self::MAX_LEN)
    }

    /// Drops every character that is not an ASCII letter, then keeps at most `max_len` of them.
    pub fn sanitize_with_limit(raw: &str, max_len: usize) -> Self {
        Self(
            raw.chars()
                .filter(char::is_ascii_alphabetic)
                .take(max_len)
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PlayerName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// The confirmed `(name, role)` a finished round is credited to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub name: PlayerName,
    pub role: Role,
}

/// Name and role as currently edited, plus the identity locked in by "ready".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    name: PlayerName,
    role: Role,
    confirmed: Option<Identity>,
}

impl PlayerProfile {
    pub fn name(&self) -> &PlayerName {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_ready(&self) -> bool {
        self.confirmed.is_some()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.confirmed.as_ref()
    }

    pub fn set_name(&mut self, raw: &str, max_len: usize) -> &PlayerName {
        self.name = PlayerName::sanitize_with_limit(raw, max_len);
        self.confirmed = None;
        &self.name
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.confirmed = None;
    }

    pub fn confirm_ready(&mut self) -> Result<&Identity> {
        if self.name.is_empty() {
            return Err(GameError::EmptyName);
        }

        let identity = Identity {
            name: self.name.clone(),
            role: self.role,
        };
        log::debug!("ready: {} as {}", identity.name, identity.role.label());
        Ok(&*self.confirmed.insert(identity))
    }
}
