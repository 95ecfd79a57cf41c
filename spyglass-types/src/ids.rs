//! Identifier types for the host's entity tables.
//!
//! The host addresses its fixed-size record arrays with small integers;
//! index `0` is reserved and means "absent" for every kind. The newtypes
//! below keep the different tables from being mixed up while staying
//! layout-compatible with the raw host values.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! host_id {
    ($(#[$doc:meta])* $name:ident, $raw:ty) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
            Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name($raw);

        impl $name {
            /// The reserved "absent" id.
            pub const NONE: Self = Self(0);

            #[must_use]
            pub const fn new(raw: $raw) -> Self {
                Self(raw)
            }

            /// Returns the raw table index.
            #[must_use]
            pub const fn get(self) -> $raw {
                self.0
            }

            /// Whether this id refers to no record at all.
            #[must_use]
            pub const fn is_none(self) -> bool {
                self.0 == 0
            }

            #[must_use]
            pub const fn is_some(self) -> bool {
                self.0 != 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$raw> for $name {
            fn from(raw: $raw) -> Self {
                Self(raw)
            }
        }
    };
}

host_id!(
    /// Index into the host's citizen table.
    CitizenId,
    u32
);

host_id!(
    /// Index into the host's moving citizen-instance table.
    CitizenInstanceId,
    u16
);

host_id!(
    /// Index into the host's active vehicle table.
    VehicleId,
    u16
);

host_id!(
    /// Index into the host's parked vehicle table.
    ParkedVehicleId,
    u16
);

host_id!(
    /// Index into the host's building table.
    BuildingId,
    u16
);
