use std::fmt;

/// Lifecycle stages a provider moves through, in execution order.
///
/// `Create` builds the provider instance; the remaining four stages are
/// hooks the provider may expose. Completed hook stages are recorded as
/// per-provider tags by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Create,
    Configure,
    Initialize,
    Boot,
    Shutdown,
}

impl Stage {
    /// Every stage in execution order
    pub const ALL: [Stage; 5] = [
        Stage::Create,
        Stage::Configure,
        Stage::Initialize,
        Stage::Boot,
        Stage::Shutdown,
    ];

    /// Stages backed by an optional provider hook
    pub const HOOKS: [Stage; 4] = [
        Stage::Configure,
        Stage::Initialize,
        Stage::Boot,
        Stage::Shutdown,
    ];

    /// The stage that must complete before this one.
    pub fn previous(self) -> Option<Stage> {
        match self {
            Stage::Create => None,
            Stage::Configure => Some(Stage::Create),
            Stage::Initialize => Some(Stage::Configure),
            Stage::Boot => Some(Stage::Initialize),
            Stage::Shutdown => Some(Stage::Boot),
        }
    }

    /// All stages from `Create` up to and including `self`.
    pub fn through(self) -> impl Iterator<Item = Stage> {
        Stage::ALL.into_iter().take_while(move |stage| *stage <= self)
    }

    /// Whether the stage corresponds to a provider hook.
    pub fn is_hook(self) -> bool {
        !matches!(self, Stage::Create)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Create => "create",
            Stage::Configure => "configure",
            Stage::Initialize => "initialize",
            Stage::Boot => "boot",
            Stage::Shutdown => "shutdown",
        }
    }

    /// Name of the marker recorded once the stage has completed.
    pub fn tag_name(self) -> &'static str {
        match self {
            Stage::Create => "created",
            Stage::Configure => "configured",
            Stage::Initialize => "initialized",
            Stage::Boot => "booted",
            Stage::Shutdown => "shutdown",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
