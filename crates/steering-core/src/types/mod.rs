//! Vocabulary types shared by the engine and the CLI.

pub mod tier;
pub mod vendor;

pub use tier::Tier;
pub use vendor::Vendor;
