//! Hyperspace AVAX SDK - Main Library
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI, command runner)
//! - **hyperspace**: Query and trade clients (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust,ignore
//! use hyperspace_avax_sdk::bin_common::{load_config_from_env, ConfigType};
//! use hyperspace_avax_sdk::hyperspace::SdkConfig;
//! ```

// Re-export workspace libraries for convenience
pub use hyperspace;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;
    pub mod runner;

    pub use cli::{load_config_from_env, parse_args, ConfigType, CONFIG_PATH_ENV};
    pub use runner::{Invocation, QueryCommand, USAGE};
}
