//! Newtype IDs for type-safe identifiers.
//!
//! Product and order ids are issued by the backend; the storefront never
//! generates them, it only carries them around and compares them.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident) => {
        /// A backend-issued identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_str() {
        let id: ProductId = "854cef69-976d-4c2a-a18c-2aa45046c390".into();
        assert_eq!(id.as_str(), "854cef69-976d-4c2a-a18c-2aa45046c390");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = OrderId::new("28c57cb4");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""28c57cb4""#);

        let back: OrderId = serde_json::from_str(r#""28c57cb4""#).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_equality() {
        assert_eq!(ProductId::new("same"), ProductId::new("same"));
        assert_ne!(ProductId::new("same"), ProductId::new("other"));
    }
}
