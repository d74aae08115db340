//! Layer lifecycle phases and liveness tokens for async completions.

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Lifecycle phase of a map layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayerPhase {
    /// Not mounted
    #[default]
    Uninitialized,
    /// Mounted, geometry load outstanding
    Loading,
    /// Features installed and listeners attached
    Ready,
    /// Geometry load failed; nothing rendered
    Failed,
}

impl LayerPhase {
    /// Whether the layer is mounted (any phase but `Uninitialized`).
    #[must_use]
    pub const fn is_mounted(self) -> bool {
        !matches!(self, Self::Uninitialized)
    }
}

impl fmt::Display for LayerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Generation counter that invalidates outstanding async work.
///
/// Each mount calls [`Liveness::arm`] and captures the returned token in the
/// pending future. Unmount calls [`Liveness::revoke`]. A completion checks
/// its token before touching anything; a token from an earlier mount, or
/// from a layer that has been dropped, is never live again.
#[derive(Debug, Default)]
pub struct Liveness {
    generation: Rc<Cell<u64>>,
}

impl Liveness {
    /// Create a counter with nothing armed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation and return its token.
    #[must_use]
    pub fn arm(&self) -> LivenessToken {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        LivenessToken {
            generation: Rc::downgrade(&self.generation),
            expected: generation,
        }
    }

    /// Invalidate every outstanding token.
    pub fn revoke(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }
}

/// Handle captured by async work to check it is still wanted.
#[derive(Debug, Clone)]
pub struct LivenessToken {
    generation: Weak<Cell<u64>>,
    expected: u64,
}

impl LivenessToken {
    /// Whether the mount that issued this token is still current.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.generation
            .upgrade()
            .is_some_and(|g| g.get() == self.expected)
    }
}
