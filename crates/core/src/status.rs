//! Status enums persisted as TEXT columns.
//!
//! Each variant's text form matches the `CHECK` constraint in the
//! corresponding table. Parsing is case-insensitive and treats spaces as
//! underscores, so `"In Progress"` and `"in_progress"` are the same status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! define_text_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The text stored in the database and sent over the wire.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_lowercase().replace(' ', "_");
                match normalized.as_str() {
                    $( $text => Ok($name::$variant), )+
                    _ => Err(CoreError::Validation(format!(
                        "Invalid {} '{}'. Expected one of: {}",
                        $label,
                        s,
                        [$($text),+].join(", "),
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

define_text_status_enum! {
    /// Order lifecycle status.
    OrderStatus ("order status") {
        Unconfirmed = "unconfirmed",
        Confirmed = "confirmed",
        InProgress = "in_progress",
        Completed = "completed",
        Cancelled = "cancelled",
    }
}

define_text_status_enum! {
    /// Laptop inventory status.
    LaptopStatus ("laptop status") {
        Available = "available",
        Sold = "sold",
    }
}

/// `(from, to)` pairs an admin may not apply. Empty: every move is legal,
/// including leaving `Completed`, which does not restore the laptops it
/// marked sold.
const BLOCKED_TRANSITIONS: &[(OrderStatus, OrderStatus)] = &[];

impl OrderStatus {
    /// Whether an admin may move an order from `self` to `next`.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        !BLOCKED_TRANSITIONS.contains(&(self, next))
    }

    /// Whether entering this status marks the order's laptops as sold.
    pub fn marks_laptops_sold(self) -> bool {
        self == OrderStatus::Completed
    }
}
