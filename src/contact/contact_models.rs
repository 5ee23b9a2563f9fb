use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::task::{Assignee, Avatar};

/// Avatar color for contacts stored without one.
pub const DEFAULT_BGCOLOR: &str = "#2a3647";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Contact {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_bgcolor")]
    pub bgcolor: String,
}

fn default_bgcolor() -> String {
    DEFAULT_BGCOLOR.to_string()
}

impl Contact {
    /// First letter of the first and last name word, uppercased.
    pub fn initials(&self) -> String {
        let mut words = self.name.split_whitespace();
        let first = words.next().and_then(|w| w.chars().next());
        let last = words.last().and_then(|w| w.chars().next());

        first
            .into_iter()
            .chain(last)
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn to_assignee(&self) -> Assignee {
        Assignee {
            name: self.name.clone(),
            avatar: Avatar {
                initials: self.initials(),
                bgcolor: self.bgcolor.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str) -> Contact {
        Contact {
            name: name.to_string(),
            email: String::new(),
            phone: String::new(),
            bgcolor: "#ff7a00".to_string(),
        }
    }

    #[test]
    fn test_initials() {
        assert_eq!(contact("anja schulz").initials(), "AS");
        assert_eq!(contact("Benedikt Maria Ziegler").initials(), "BZ");
        assert_eq!(contact("Cher").initials(), "C");
        assert_eq!(contact("   ").initials(), "");
    }

    #[test]
    fn test_missing_bgcolor_defaults() {
        let contact: Contact = serde_json::from_str(r#"{"name":"Eva Fischer"}"#).unwrap();
        assert_eq!(contact.bgcolor, DEFAULT_BGCOLOR);
        assert_eq!(contact.to_assignee().avatar.initials, "EF");
    }
}
