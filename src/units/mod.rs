//! Concrete program units and the registered kind table.
//!
//! Manifests name units by kind; this module replaces that stringly-typed
//! value with a proper enum and maps each kind to its constructor. Adding a
//! unit means adding a variant here and a manifest file in the units
//! directory; nothing else registers it.

pub mod arithmetic;
pub mod greeting;
pub mod recaman;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::config::LauncherConfig;
use crate::unit::ProgramUnit;

pub use arithmetic::ArithmeticTableUnit;
pub use greeting::GreetingUnit;
pub use recaman::RecamanUnit;

/// The registered concrete `ProgramUnit` implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum UnitKind {
    /// Literal greeting printout.
    Greeting,
    /// Multiplication-table printout.
    ArithmeticTable,
    /// Persistent Recaman sequence generator.
    RecamanSequence,
}

impl UnitKind {
    /// Construct a fresh instance of this kind.
    pub fn instantiate(&self, config: &LauncherConfig) -> Box<dyn ProgramUnit> {
        match self {
            UnitKind::Greeting => Box::new(GreetingUnit),
            UnitKind::ArithmeticTable => Box::new(ArithmeticTableUnit),
            UnitKind::RecamanSequence => Box::new(RecamanUnit::new(config.sequence_config())),
        }
    }

    /// Comma-separated list of every registered kind, for error messages.
    pub fn known_kinds() -> String {
        Self::iter()
            .map(|kind| kind.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
