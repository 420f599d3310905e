pub mod library;
pub mod os;
pub mod rule;

pub use library::{ExtractRules, LibraryDescriptor, DEFAULT_LIBRARY_URL};
pub use os::{arch_bits, OperatingSystem, PlatformContext};
pub use rule::{evaluate, CompatibilityRule, OsRestriction, RuleAction};
