//! Order status vocabulary and transition policies

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::errors::DomainError;

/// Lifecycle status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    PickedUp,
    Processing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 6] = [
        Self::Pending,
        Self::PickedUp,
        Self::Processing,
        Self::Ready,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::PickedUp => "PICKED_UP",
            Self::Processing => "PROCESSING",
            Self::Ready => "READY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// The next step on the happy path, if any.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            Self::Pending => Some(Self::PickedUp),
            Self::PickedUp => Some(Self::Processing),
            Self::Processing => Some(Self::Ready),
            Self::Ready => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    /// Exact, case-sensitive match on the wire token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStatus(s.to_string()))
    }
}

/// Rule set deciding which status changes are accepted.
///
/// Writing the current status again is accepted under every policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any status may overwrite any other.
    #[default]
    Unrestricted,
    /// Like `Unrestricted`, except CANCELLED is final.
    TerminalCancel,
    /// One step at a time along the happy path; CANCELLED from any
    /// non-terminal state; DELIVERED and CANCELLED are final.
    ForwardOnly,
}

impl TransitionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unrestricted => "unrestricted",
            Self::TerminalCancel => "terminal_cancel",
            Self::ForwardOnly => "forward_only",
        }
    }

    pub fn allows(&self, from: OrderStatus, to: OrderStatus) -> bool {
        if from == to {
            return true;
        }
        match self {
            Self::Unrestricted => true,
            Self::TerminalCancel => from != OrderStatus::Cancelled,
            Self::ForwardOnly => {
                !from.is_terminal() && (to == OrderStatus::Cancelled || from.next() == Some(to))
            }
        }
    }

    pub fn check(&self, from: OrderStatus, to: OrderStatus) -> Result<(), DomainError> {
        if self.allows(from, to) {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            })
        }
    }
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
