//! State machines for map layers.
//!
//! Layer state follows the Elm pattern: `State + Message → (State, Command)`.
//! `update` is pure; the returned [`Command`] describes what the surface or a
//! collaborator should do, and the owning layer applies it.
//!
//! # Examples
//!
//! ```
//! use hoodmap_core::{Command, State};
//!
//! #[derive(Debug, Clone, Default)]
//! struct Open(bool);
//!
//! enum Toggle {
//!     Flip,
//! }
//!
//! impl State for Open {
//!     type Message = Toggle;
//!
//!     fn update(&mut self, msg: Toggle) -> Command {
//!         match msg {
//!             Toggle::Flip => self.0 = !self.0,
//!         }
//!         if self.0 { Command::ClosePopover } else { Command::None }
//!     }
//! }
//!
//! let mut state = Open::default();
//! assert_eq!(state.update(Toggle::Flip), Command::ClosePopover);
//! ```

use crate::geometry::LatLng;
use crate::popover::PopoverCard;
use crate::tooltip::FeatureTooltip;

/// Layer state driven by messages.
pub trait State: Clone {
    /// Message type for state updates
    type Message;

    /// Update state in response to a message.
    fn update(&mut self, msg: Self::Message) -> Command;
}

/// Effects requested by a state update.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Command {
    /// No command
    #[default]
    None,
    /// Execute multiple commands in order
    Batch(Vec<Command>),
    /// Navigate to a route
    Navigate {
        /// Route path
        route: String,
    },
    /// Recompute and apply the paint style of every feature
    Restyle,
    /// Show or move the hover tooltip
    ShowTooltip(FeatureTooltip),
    /// Hide the hover tooltip
    HideTooltip,
    /// Open the popover
    OpenPopover {
        /// Anchor position
        position: LatLng,
        /// Content
        card: PopoverCard,
    },
    /// Close the popover
    ClosePopover,
    /// Hand a slug to the lead-capture collaborator
    RequestReport {
        /// Neighbourhood slug
        slug: String,
    },
}

impl Command {
    /// Create a batch of commands.
    pub fn batch(commands: impl IntoIterator<Item = Self>) -> Self {
        Self::Batch(commands.into_iter().collect())
    }

    /// Check if this is the none command.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Flatten nested batches into a list of leaf commands, dropping `None`.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<Self>) {
        match self {
            Self::None => {}
            Self::Batch(cmds) => {
                for cmd in cmds {
                    cmd.flatten_into(out);
                }
            }
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigate(route: &str) -> Command {
        Command::Navigate {
            route: route.to_string(),
        }
    }

    #[test]
    fn test_command_default_is_none() {
        assert!(Command::default().is_none());
        assert!(!Command::Restyle.is_none());
    }

    #[test]
    fn test_command_flatten() {
        let cmd = Command::batch([
            Command::Restyle,
            Command::None,
            Command::batch([Command::HideTooltip, Command::batch([])]),
            navigate("/neighbourhoods/oakridge"),
        ]);
        assert_eq!(
            cmd.flatten(),
            vec![
                Command::Restyle,
                Command::HideTooltip,
                navigate("/neighbourhoods/oakridge"),
            ]
        );
    }

    #[test]
    fn test_flatten_none() {
        assert!(Command::None.flatten().is_empty());
    }
}
