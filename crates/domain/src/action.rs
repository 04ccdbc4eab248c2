//! Action sets: the closed vocabularies a request may select from.
//!
//! Every set is generated by [`define_actions!`] so the enum, its wire
//! names, the `ALL` list and the parser are derived from a single
//! declaration and cannot disagree.

/// Declare a closed action enum with its wire names.
///
/// The generated type gets an `ALL` constant, `as_str`, `names`,
/// [`Display`](std::fmt::Display) and [`FromStr`](std::str::FromStr); parsing
/// an unknown name yields the error built by the `unknown` constructor.
macro_rules! define_actions {
    (
        $(#[doc = $doc:expr])*
        $name:ident, unknown = $unknown:path {
            $($(#[doc = $vdoc:expr])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[doc = $vdoc])* $variant),+
        }

        impl $name {
            /// Every member of the set, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire name of this action.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }

            /// Wire names of every member, in declaration order.
            #[must_use]
            pub fn names() -> Vec<&'static str> {
                Self::ALL.iter().map(|action| action.as_str()).collect()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|action| action.as_str() == s)
                    .ok_or_else(|| $unknown(s.to_string()))
            }
        }
    };
}

pub(crate) use define_actions;

use crate::error::ValidationError;

define_actions!(
    /// Operations offered by the Redfish (management controller) family.
    RedfishAction, unknown = ValidationError::UnknownAction {
        /// Full record of the first system.
        SystemInfo => "system_info",
        /// Temperatures and fans of the first chassis.
        Thermal => "thermal",
        /// Power supplies and consumption of the first chassis.
        Power => "power",
        /// Current `PowerState` of the first system.
        PowerState => "power_state",
        /// Issue a reset action against the first system.
        PowerControl => "power_control",
    }
);

define_actions!(
    /// Operations offered by the smart plug family.
    PlugAction, unknown = ValidationError::UnknownAction {
        /// Scan the network, optionally scoped to a `target`.
        Discover => "discover",
        /// Scan the network and return a snapshot of every plug.
        GetDeviceList => "get_device_list",
        /// Snapshot of the plug at `ip_address`.
        GetDevice => "get_device",
        /// Flip the relay of the plug at `ip_address`.
        ToggleDevice => "toggle_device",
        /// Drive the relay of the plug at `ip_address` to `power_state`.
        SetDeviceState => "set_device_state",
    }
);
