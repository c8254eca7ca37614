//! Packes - pack an ES module entry file into one standalone script
//!
//! A generic bundler does not understand the entry file's own `import` and
//! `export ... from` statements, so Packes rewrites around it:
//!
//! - the entry's imports and re-exports are scanned and moved into a
//!   synthetic *bridge module* that re-exports everything through one
//!   aggregate namespace;
//! - the bridge module is bundled into a script defining that namespace;
//! - the final file is the bundle, a `const {...} = __PACKES__;` preamble
//!   recovering every imported name, and the rest of the entry file.
//!
//! Statement recognition is pattern based, not a parser: six import/export
//! shapes are understood at the start of a line, and anything else is left
//! alone.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use packes::{Config, PackOptions, Packer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let packer = Packer::new(Config::default())?;
//!
//!     let options = PackOptions {
//!         alias: Some("react=./vendor/react.js".to_string()),
//!         minify: true,
//!         ..Default::default()
//!     };
//!
//!     let result = packer.pack(Path::new("src/main.js"), Path::new("dist/main.js"), options).await?;
//!     println!("Packed {} bytes", result.size);
//!
//!     Ok(())
//! }
//! ```

pub mod alias;
pub mod bindings;
pub mod bridge;
pub mod bundler;
pub mod clause;
pub mod cli;
pub mod config;
pub mod errors;
pub mod output;
pub mod packer;
pub mod scanner;
pub mod scratch;
pub mod specifier;

// Re-export main types for convenience
pub use config::Config;
pub use errors::{PackError, Result};
pub use packer::{PackOptions, PackResult, Packer, ScanReport};
pub use scanner::{ScanOutput, StatementKind, StatementRecord, StatementScanner};

/// Current version of Packes
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Global name the bundled script defines and the preamble destructures from
pub const AGGREGATE_NAMESPACE: &str = "__PACKES__";
