//! Strongly-typed identifiers for domain entities
//!
//! Newtype wrappers around UUIDs so a bill id cannot be handed to something
//! expecting a customer id. Display carries a short prefix for log lines;
//! parsing accepts both the prefixed and the bare UUID form. Serde stays
//! transparent because the storage layer deals in bare UUID strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            ///
            /// Preferred for stored rows so index order follows insert order.
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Wraps an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bare = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(bare)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Billing domain
define_id!(BillId, "BILL");

// Reference entities
define_id!(CustomerId, "CUST");
define_id!(ProductId, "PROD");
define_id!(ExpenseId, "EXP");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_id_display() {
        let id = BillId::new();
        let display = id.to_string();
        assert!(display.starts_with("BILL-"));
    }

    #[test]
    fn test_bill_id_roundtrip_with_prefix() {
        let id = BillId::new();
        let parsed: BillId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_bill_id_parse_bare_uuid() {
        let uuid = Uuid::new_v4();
        let parsed: BillId = uuid.to_string().parse().unwrap();
        assert_eq!(parsed.as_uuid(), &uuid);
    }

    #[test]
    fn test_ids_are_distinct_types() {
        // Two ids built from the same UUID still compare equal only within a type
        let uuid = Uuid::new_v4();
        let bill = BillId::from_uuid(uuid);
        let customer = CustomerId::from_uuid(uuid);
        assert_eq!(bill.as_uuid(), customer.as_uuid());
    }

    #[test]
    fn test_serde_transparent() {
        let id = ProductId::new();
        let json = serde_json::to_string(&id).unwrap();
        // Serializes as a bare UUID string, no struct wrapper
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_v7_ids_are_time_ordered() {
        let a = BillId::new_v7();
        let b = BillId::new_v7();
        assert!(a.as_uuid() <= b.as_uuid());
    }
}
