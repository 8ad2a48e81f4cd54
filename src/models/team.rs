//! Team and TeamRef data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a team: its name within its category.
///
/// Two teams with the same name in different categories are distinct.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct TeamRef {
    pub category: String,
    pub name: String,
}

impl TeamRef {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TeamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.category)
    }
}

/// A registered team. Immutable once created.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub category: String,
    pub coach: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub registered_at: DateTime<Utc>,
}

impl Team {
    /// Create a team with the given name and category; contact fields start empty.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            coach: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            registered_at: Utc::now(),
        }
    }

    /// Same as [`Team::new`] with coach and contact details filled in.
    pub fn with_contact(
        name: impl Into<String>,
        category: impl Into<String>,
        coach: impl Into<String>,
        contact_email: impl Into<String>,
        contact_phone: impl Into<String>,
    ) -> Self {
        Self {
            coach: coach.into(),
            contact_email: contact_email.into(),
            contact_phone: contact_phone.into(),
            ..Self::new(name, category)
        }
    }

    pub fn team_ref(&self) -> TeamRef {
        TeamRef::new(self.category.clone(), self.name.clone())
    }

    /// True if `other` identifies this team.
    pub fn is(&self, other: &TeamRef) -> bool {
        self.name == other.name && self.category == other.category
    }
}
