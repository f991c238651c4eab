//! Configuration system for steering.
//! TOML or YAML project file, 3-layer resolution: CLI > env > project file > defaults.

pub mod steering_config;

pub use steering_config::{CliOverrides, SkillsConfig, SteeringConfig};
