//! # rolegen-core
//!
//! The sequential pipeline behind rolegen.
//!
//! This crate provides:
//! - The four seams (`DiscoveryProvider`, `RoleSynthesizer`, `RoleMerger`,
//!   `RoleSink`)
//! - The `Generator` that runs them in order for one generation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rolegen_core::{Generator, GeneratorConfig};
//!
//! let generator = Generator::new(discovery, synthesizer, merger, sink, GeneratorConfig::default());
//! let generation = generator.run(overlay)?;
//! println!("{}", generation.rendered);
//! ```

pub mod generator;
pub mod traits;

pub use generator::{Generation, Generator, GeneratorConfig};
