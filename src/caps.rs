//! Compiler capability resolution.
//!
//! Maps the build-time facts in a [`Target`] to the set of portability
//! strategies the codec's native kernels rely on:
//!
//! - **Inlining**: forced inlining beyond the compiler's heuristic.
//! - **Visibility**: hiding non-exported symbols from the dynamic linker.
//! - **Thread-local storage**: per-thread instances of scratch state.
//! - **Bit scan**: a count-trailing-zeros instruction for Huffman bit
//!   manipulation.
//! - **Fallthrough**: annotating intentional switch fallthrough.
//!
//! Every decision is a pure function of the target facts: no probing, no
//! environment reads, no state. Each capability resolves to exactly one
//! strategy, and "unsupported" is a valid terminal strategy, never an error.
//! Downstream code must check the presence flag of a capability before using
//! its token; see [`crate::header`] for the emitted contract.
//!
//! # Example
//!
//! ```rust
//! use capgen::{resolve, InlineStrategy, Target};
//!
//! let caps = resolve(Target::gnu64());
//! assert_eq!(caps.inline, Some(InlineStrategy::ForceGnu));
//! assert!(caps.is_complete());
//! ```

use crate::target::{CompilerFamily, Target};

/// How function inlining is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineStrategy {
    /// GCC/Clang forced inlining.
    ForceGnu,
    /// MSVC forced inlining.
    ForceMsvc,
    /// Plain `inline`: advisory only, no forcing.
    Advisory,
}

impl InlineStrategy {
    /// The literal token downstream code emits in place of `inline`.
    pub fn token(self) -> &'static str {
        match self {
            InlineStrategy::ForceGnu => "inline __attribute__((always_inline))",
            InlineStrategy::ForceMsvc => "__forceinline",
            InlineStrategy::Advisory => "inline",
        }
    }
}

/// How non-exported symbols are hidden from the dynamic linker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityStrategy {
    /// GCC/Clang hidden-visibility attribute.
    Hidden,
    /// No visibility attribute on this platform; the token is empty.
    Unsupported,
}

impl VisibilityStrategy {
    /// The attribute token, empty when the capability is absent.
    pub fn token(self) -> &'static str {
        match self {
            VisibilityStrategy::Hidden => "__attribute__((visibility(\"hidden\")))",
            VisibilityStrategy::Unsupported => "",
        }
    }

    /// Whether the platform can hide symbols at all.
    pub fn is_supported(self) -> bool {
        !matches!(self, VisibilityStrategy::Unsupported)
    }
}

/// How thread-local storage is declared.
///
/// Not every platform can express thread-local storage; `Unsupported` is a
/// genuine capability gap, not a placeholder. Consumers must check
/// [`ThreadLocalStrategy::is_supported`] before relying on per-thread state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadLocalStrategy {
    /// GCC/Clang `__thread` storage class.
    Gnu,
    /// MSVC `__declspec(thread)` storage class.
    Msvc,
    /// No thread-local keyword; the token is empty and no presence flag is
    /// emitted.
    Unsupported,
}

impl ThreadLocalStrategy {
    /// The storage-class token, empty when the capability is absent.
    pub fn token(self) -> &'static str {
        match self {
            ThreadLocalStrategy::Gnu => "__thread",
            ThreadLocalStrategy::Msvc => "__declspec(thread)",
            ThreadLocalStrategy::Unsupported => "",
        }
    }

    /// Whether the platform has thread-local storage.
    pub fn is_supported(self) -> bool {
        !matches!(self, ThreadLocalStrategy::Unsupported)
    }
}

/// Which count-trailing-zeros primitive is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitScanStrategy {
    /// GCC/Clang `__builtin_ctzl`.
    BuiltinCtzl,
    /// MSVC `_BitScanForward64` (8-byte `size_t`).
    BitScanForward64,
    /// MSVC `_BitScanForward` (4-byte `size_t`).
    BitScanForward,
    /// No intrinsic selected; callers fall back to a generic loop.
    Unavailable,
}

impl BitScanStrategy {
    /// Flag macro announcing the selected intrinsic: `(name, value)`, where
    /// an empty value means a bare `#define`. `None` when no intrinsic is
    /// available and no flag is emitted.
    pub fn flag(self) -> Option<(&'static str, &'static str)> {
        match self {
            BitScanStrategy::BuiltinCtzl => Some(("HAVE_BUILTIN_CTZL", "1")),
            BitScanStrategy::BitScanForward64 => Some(("HAVE_BITSCANFORWARD64", "")),
            BitScanStrategy::BitScanForward => Some(("HAVE_BITSCANFORWARD", "")),
            BitScanStrategy::Unavailable => None,
        }
    }
}

/// How intentional switch fallthrough is annotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallthroughStrategy {
    /// Empty definition: the annotation is advisory-only in this
    /// configuration.
    NoOp,
}

impl FallthroughStrategy {
    /// The annotation token.
    pub fn token(self) -> &'static str {
        match self {
            FallthroughStrategy::NoOp => "",
        }
    }
}

/// The resolved capability set.
///
/// A `None` slot means "not yet decided". Callers may pre-populate slots
/// before [`fill`](CapabilitySet::fill) to override individual decisions;
/// resolution never touches a populated slot, mirroring the definedness
/// guards on the emitted macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilitySet {
    /// Inlining strategy.
    pub inline: Option<InlineStrategy>,
    /// Symbol-visibility strategy.
    pub visibility: Option<VisibilityStrategy>,
    /// Thread-local-storage strategy.
    pub thread_local: Option<ThreadLocalStrategy>,
    /// Count-trailing-zeros strategy.
    pub bit_scan: Option<BitScanStrategy>,
    /// Fallthrough-annotation strategy.
    pub fallthrough: Option<FallthroughStrategy>,
}

impl CapabilitySet {
    /// A set with every slot undecided.
    pub const EMPTY: Self = Self {
        inline: None,
        visibility: None,
        thread_local: None,
        bit_scan: None,
        fallthrough: None,
    };

    /// Whether every capability has been decided.
    pub fn is_complete(&self) -> bool {
        self.inline.is_some()
            && self.visibility.is_some()
            && self.thread_local.is_some()
            && self.bit_scan.is_some()
            && self.fallthrough.is_some()
    }

    /// Fill every undecided slot from the decision table.
    ///
    /// Already-populated slots are left untouched. After this call the set is
    /// complete for any `target`: unsupported combinations resolve to an
    /// explicit "absent" strategy rather than staying undecided.
    pub fn fill(&mut self, target: Target) {
        if self.inline.is_none() {
            self.inline = Some(match target.compiler {
                CompilerFamily::GnuCompatible => InlineStrategy::ForceGnu,
                CompilerFamily::Msvc => InlineStrategy::ForceMsvc,
                CompilerFamily::Other => InlineStrategy::Advisory,
            });
        }

        if self.visibility.is_none() {
            self.visibility = Some(match target.compiler {
                CompilerFamily::GnuCompatible => VisibilityStrategy::Hidden,
                CompilerFamily::Msvc | CompilerFamily::Other => VisibilityStrategy::Unsupported,
            });
        }

        if self.thread_local.is_none() {
            self.thread_local = Some(match target.compiler {
                CompilerFamily::Msvc => ThreadLocalStrategy::Msvc,
                CompilerFamily::GnuCompatible => ThreadLocalStrategy::Gnu,
                CompilerFamily::Other => ThreadLocalStrategy::Unsupported,
            });
        }

        if self.bit_scan.is_none() {
            self.bit_scan = Some(match target.compiler {
                // Word sizes other than 4 and 8 select no intrinsic; the
                // generic fallback downstream handles them.
                CompilerFamily::Msvc => match target.size_t_bytes {
                    8 => BitScanStrategy::BitScanForward64,
                    4 => BitScanStrategy::BitScanForward,
                    _ => BitScanStrategy::Unavailable,
                },
                CompilerFamily::GnuCompatible => BitScanStrategy::BuiltinCtzl,
                CompilerFamily::Other => BitScanStrategy::Unavailable,
            });
        }

        if self.fallthrough.is_none() {
            self.fallthrough = Some(FallthroughStrategy::NoOp);
        }
    }
}

/// Resolve the full capability set for a target.
///
/// Equivalent to filling [`CapabilitySet::EMPTY`]. Total and deterministic:
/// every slot is decided afterwards, and the same target always yields the
/// same set.
pub fn resolve(target: Target) -> CapabilitySet {
    let mut caps = CapabilitySet::EMPTY;
    caps.fill(target);
    caps
}
