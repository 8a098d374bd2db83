//! Frame capability allow-list.

use std::fmt;

/// A capability the frame may be granted.
///
/// Anything not listed in a [`SandboxPolicy`] is denied by omission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    /// Run scripts.
    Scripts,
    /// Keep the document's origin instead of an opaque one.
    SameOrigin,
    /// Submit forms.
    Forms,
    /// Open popups.
    Popups,
    /// Navigate the top-level browsing context.
    TopNavigation,
    /// Capture the pointer.
    PointerLock,
    /// Open modal dialogs.
    Modals,
}

impl Capability {
    /// Token used in the frame's `sandbox` attribute.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Scripts => "allow-scripts",
            Self::SameOrigin => "allow-same-origin",
            Self::Forms => "allow-forms",
            Self::Popups => "allow-popups",
            Self::TopNavigation => "allow-top-navigation",
            Self::PointerLock => "allow-pointer-lock",
            Self::Modals => "allow-modals",
        }
    }
}

/// Capability allow-list for the preview frame.
///
/// The default grants script execution and same-origin access only.
///
/// # Example
///
/// ```ignore
/// let policy = SandboxPolicy::default();
/// assert_eq!(policy.to_string(), "allow-scripts allow-same-origin");
/// assert!(!policy.allows(Capability::Forms));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SandboxPolicy {
    capabilities: Vec<Capability>,
}

impl Default for SandboxPolicy {
    fn default() -> Self {
        Self {
            capabilities: vec![Capability::Scripts, Capability::SameOrigin],
        }
    }
}

impl SandboxPolicy {
    /// A policy that grants nothing.
    pub fn deny_all() -> Self {
        Self {
            capabilities: Vec::new(),
        }
    }

    /// Grant an additional capability.
    pub fn allow(mut self, capability: Capability) -> Self {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    /// Whether `capability` is granted.
    pub fn allows(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Granted capabilities in grant order.
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }
}

impl fmt::Display for SandboxPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, capability) in self.capabilities.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(capability.token())?;
        }
        Ok(())
    }
}
