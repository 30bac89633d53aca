use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named binding supplied by the external animation runtime.
///
/// The glue never looks inside a binding; it only needs to know whether the
/// binding has been installed yet and which factory surface it answers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// The runtime core, carrying the plugin-registration entry point
    Core,
    /// The scroll-trigger factory plugin
    Triggers,
    /// The scroll-smoothing factory plugin
    Smoothing,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::Core,
        Capability::Triggers,
        Capability::Smoothing,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Capability::Core => "core",
            Capability::Triggers => "triggers",
            Capability::Smoothing => "smoothing",
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Capability::Core => 1 << 0,
            Capability::Triggers => 1 << 1,
            Capability::Smoothing => 1 << 2,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Capability {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "core" => Ok(Capability::Core),
            "triggers" => Ok(Capability::Triggers),
            "smoothing" => Ok(Capability::Smoothing),
            other => Err(crate::Error::Config(format!(
                "unknown capability '{}' (expected core, triggers or smoothing)",
                other
            ))),
        }
    }
}

/// Set of capabilities, packed into a small bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    pub const EMPTY: CapabilitySet = CapabilitySet(0);

    /// The full set of known capabilities.
    pub fn all() -> Self {
        Capability::ALL.into_iter().collect()
    }

    pub fn insert(&mut self, capability: Capability) {
        self.0 |= capability.bit();
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    pub fn contains_all(&self, other: CapabilitySet) -> bool {
        self.0 & other.0 == other.0
    }

    /// Capabilities in `required` that are absent from this set.
    pub fn missing(&self, required: CapabilitySet) -> CapabilitySet {
        CapabilitySet(required.0 & !self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL
            .into_iter()
            .filter(move |capability| self.contains(*capability))
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        let mut set = CapabilitySet::EMPTY;
        for capability in iter {
            set.insert(capability);
        }
        set
    }
}

impl Extend<Capability> for CapabilitySet {
    fn extend<I: IntoIterator<Item = Capability>>(&mut self, iter: I) {
        for capability in iter {
            self.insert(capability);
        }
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for capability in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(capability.name())?;
            first = false;
        }
        Ok(())
    }
}
