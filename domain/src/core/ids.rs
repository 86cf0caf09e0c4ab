//! Typed identifiers for records owned by the backend.
//!
//! Every identifier is an opaque integer assigned by the server. Distinct
//! types keep a unit id from being passed where a buyer id is expected.

use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map($name)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                $name(value)
            }
        }
    };
}

record_id!(
    /// Identifier of a project
    ProjectId
);
record_id!(
    /// Identifier of a block inside a project
    BlockId
);
record_id!(
    /// Identifier of a floor inside a block
    FloorId
);
record_id!(
    /// Identifier of a unit on a floor
    UnitId
);
record_id!(
    /// Identifier of a house in a non-block project
    HouseId
);
record_id!(
    /// Identifier of a buyer or tenant user
    BuyerId
);
record_id!(OwnerId);
record_id!(AgentId);
record_id!(TemplateId);
record_id!(DocumentId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(" 42 ".parse::<UnitId>().unwrap(), UnitId(42));
        assert!("abc".parse::<UnitId>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&ProjectId(7)).unwrap();
        assert_eq!(json, "7");
        let back: ProjectId = serde_json::from_str("7").unwrap();
        assert_eq!(back, ProjectId(7));
    }
}
