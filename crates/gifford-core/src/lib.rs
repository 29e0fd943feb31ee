//! # gifford-core
//!
//! The Gifford keystream generator: an 8-byte mutating state driven by two
//! nonlinear feedback functions, combined with data by XOR.
//!
//! ## Quick Start
//!
//! ```
//! use gifford_core::{KeystreamEngine, REFERENCE_KEY};
//!
//! let mut engine = KeystreamEngine::new(REFERENCE_KEY);
//! let mut data = vec![0x00u8; 16];
//! engine.transform(&mut data);
//!
//! // A freshly keyed engine inverts the transform (Vernam property).
//! let mut engine = KeystreamEngine::new(REFERENCE_KEY);
//! engine.transform(&mut data);
//! assert_eq!(data, vec![0x00u8; 16]);
//! ```
//!
//! ## Architecture
//!
//! Key → State (8 signed bytes) → per-byte step → keystream XOR output
//!
//! Each step also appends the first feedback byte to an observation sequence,
//! which is the object under statistical test (see the `gifford-tests` crate).
//! State evolution depends only on the key and step index, never on the data
//! being transformed, so encryption and decryption are the same operation.
//!
//! This is a faithful reconstruction of one specific, historically weak
//! construction. It is **not** cryptographically secure and carries no
//! authentication or key-derivation scheme.

pub mod engine;
pub mod io;

pub use engine::{KeystreamEngine, REFERENCE_KEY};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
