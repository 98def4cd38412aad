//! # capgen
//!
//! Compiler capability resolver and config header generator for native image
//! codec builds.
//!
//! An image codec's hot paths (entropy coding, DCT kernels, Huffman bit
//! manipulation) lean on a handful of compiler-specific features: forced
//! inlining, hidden symbol visibility, thread-local storage, and a
//! count-trailing-zeros instruction. `capgen` resolves, ahead of native
//! compilation, which of those features the target actually has, and emits a
//! config header of uniform portability macros so the codec sources never
//! need per-platform conditionals of their own.
//!
//! - **Pure and total**: resolution is a plain function of compiler family
//!   and word size. Every input maps to a complete set of decisions;
//!   "capability absent" is a valid outcome, never an error.
//! - **Deterministic**: the same facts always produce byte-identical output.
//! - **Safely re-includable**: every emitted definition group carries an
//!   `#ifndef` guard, so double inclusion and caller-predefined macros never
//!   cause redefinition conflicts.
//!
//! ## Quickstart
//!
//! ```rust
//! use capgen::{generate, HeaderOptions, Target};
//!
//! # fn main() -> capgen::Result<()> {
//! let options = HeaderOptions::builder("mozjpeg-sys", "2.2.3")
//!     .target(Target::from_triple("x86_64-unknown-linux-gnu"))
//!     .build_label("1763876105-mozjpeg-sys")
//!     .build();
//! let header = generate(&options)?;
//! assert!(header.contains("#define INLINE inline __attribute__((always_inline))"));
//! assert!(header.contains("#define HAVE_BUILTIN_CTZL 1"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Inspecting decisions without emitting
//!
//! ```rust
//! use capgen::{resolve, BitScanStrategy, Target};
//!
//! let caps = resolve(Target::msvc64());
//! assert_eq!(caps.bit_scan, Some(BitScanStrategy::BitScanForward64));
//! ```
//!
//! ## Overriding a decision
//!
//! Slots pre-populated in [`CapabilitySet`] win over the decision table, the
//! same way a macro predefined by the including context wins over the
//! emitted guarded definition:
//!
//! ```rust
//! use capgen::{generate, CapabilitySet, HeaderOptions, InlineStrategy, Target};
//!
//! # fn main() -> capgen::Result<()> {
//! let overrides = CapabilitySet {
//!     inline: Some(InlineStrategy::Advisory),
//!     ..CapabilitySet::EMPTY
//! };
//! let options = HeaderOptions::builder("mozjpeg-sys", "2.2.3")
//!     .target(Target::gnu64())
//!     .overrides(overrides)
//!     .build();
//! let header = generate(&options)?;
//! assert!(header.contains("#define INLINE inline\n"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Consumer contract
//!
//! Downstream native code must check a capability's presence flag before
//! using its token: `HAVE_THREAD_LOCAL` before `THREAD_LOCAL`-qualified
//! state, and one of `HAVE_BUILTIN_CTZL` / `HAVE_BITSCANFORWARD64` /
//! `HAVE_BITSCANFORWARD` before the matching intrinsic. When no bit-scan
//! flag is defined, a generic loop-based fallback must be compiled in
//! instead. Unsupported combinations degrade to "flag omitted" by design;
//! the resolver never aborts a build.

#![forbid(unsafe_code)]

pub mod caps;
pub mod error;
pub mod header;
pub mod target;

pub use caps::{
    resolve, BitScanStrategy, CapabilitySet, FallthroughStrategy, InlineStrategy,
    ThreadLocalStrategy, VisibilityStrategy,
};
pub use error::{Error, Result};
pub use header::{generate, generate_into, write_to, HeaderOptions};
pub use target::{CompilerFamily, Target};
