//! Build-time target facts: compiler family and word size.
//!
//! A [`Target`] captures the two facts capability resolution depends on. Both
//! are fixed before resolution starts and never change during a pass; the
//! usual source is the build script environment (a target triple), but the
//! fields are plain data and can be supplied directly.

/// Compiler family a native build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompilerFamily {
    /// GCC and compatible compilers, including Clang.
    GnuCompatible,
    /// Microsoft Visual C++.
    Msvc,
    /// Anything else: only baseline language features are assumed.
    Other,
}

/// Facts about the native target, fixed for one resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    /// Compiler family.
    pub compiler: CompilerFamily,
    /// Byte width of the platform's `size_t`.
    pub size_t_bytes: u8,
}

/// Architectures with an 8-byte `size_t`.
const ARCH_64: &[&str] = &[
    "x86_64",
    "aarch64",
    "arm64",
    "powerpc64",
    "riscv64",
    "mips64",
    "sparc64",
    "sparcv9",
    "s390x",
    "loongarch64",
    "wasm64",
];

/// Architectures with a 4-byte `size_t`.
const ARCH_32: &[&str] = &[
    "i386", "i486", "i586", "i686", "x86", "arm", "thumb", "riscv32", "mips", "powerpc", "sparc",
    "wasm32", "m68k",
];

/// Triple components that indicate a GCC-compatible toolchain.
const GNU_LIKE: &[&str] = &[
    "gnu",
    "musl",
    "uclibc",
    "darwin",
    "apple",
    "android",
    "linux",
    "freebsd",
    "netbsd",
    "openbsd",
    "dragonfly",
    "fuchsia",
    "haiku",
    "illumos",
    "solaris",
    "redox",
    "emscripten",
    "wasi",
];

impl Target {
    /// Create a target from explicit facts.
    pub fn new(compiler: CompilerFamily, size_t_bytes: u8) -> Self {
        Self {
            compiler,
            size_t_bytes,
        }
    }

    /// 64-bit GCC-compatible target (the common Linux/macOS case).
    pub fn gnu64() -> Self {
        Self::new(CompilerFamily::GnuCompatible, 8)
    }

    /// 64-bit MSVC target.
    pub fn msvc64() -> Self {
        Self::new(CompilerFamily::Msvc, 8)
    }

    /// 64-bit target with an unrecognized compiler.
    pub fn other64() -> Self {
        Self::new(CompilerFamily::Other, 8)
    }

    /// Classify an LLVM-style target triple (as seen in `TARGET` inside a
    /// build script) into compiler family and word size.
    ///
    /// `-msvc` environments map to [`CompilerFamily::Msvc`]; the mainstream
    /// Unix-like and GNU environments (including `windows-gnu`) map to
    /// [`CompilerFamily::GnuCompatible`]; anything unrecognized maps to
    /// [`CompilerFamily::Other`]. An unrecognized architecture defaults to an
    /// 8-byte `size_t`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use capgen::{CompilerFamily, Target};
    ///
    /// let target = Target::from_triple("x86_64-pc-windows-msvc");
    /// assert_eq!(target.compiler, CompilerFamily::Msvc);
    /// assert_eq!(target.size_t_bytes, 8);
    /// ```
    pub fn from_triple(triple: &str) -> Self {
        let mut parts = triple.split('-');
        let arch = parts.next().unwrap_or("");

        // 64-bit prefixes first: `x86_64` also starts with `x86`, `sparcv9`
        // with `sparc`, `mips64el` with `mips`.
        let size_t_bytes = if ARCH_64.iter().any(|a| arch.starts_with(*a)) {
            8
        } else if ARCH_32.iter().any(|a| arch.starts_with(*a)) {
            4
        } else {
            // Unknown architecture: assume a 64-bit target.
            8
        };

        let compiler = if parts.clone().any(|p| p.contains("msvc")) {
            CompilerFamily::Msvc
        } else if parts.any(|p| GNU_LIKE.iter().any(|g| p.starts_with(*g))) {
            CompilerFamily::GnuCompatible
        } else {
            CompilerFamily::Other
        };

        Self::new(compiler, size_t_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_triple_msvc() {
        let t = Target::from_triple("x86_64-pc-windows-msvc");
        assert_eq!(t, Target::msvc64());

        let t = Target::from_triple("i686-pc-windows-msvc");
        assert_eq!(t.compiler, CompilerFamily::Msvc);
        assert_eq!(t.size_t_bytes, 4);

        let t = Target::from_triple("aarch64-pc-windows-msvc");
        assert_eq!(t.compiler, CompilerFamily::Msvc);
        assert_eq!(t.size_t_bytes, 8);
    }

    #[test]
    fn test_from_triple_gnu_compatible() {
        let t = Target::from_triple("x86_64-unknown-linux-gnu");
        assert_eq!(t, Target::gnu64());

        let t = Target::from_triple("aarch64-apple-darwin");
        assert_eq!(t, Target::gnu64());

        let t = Target::from_triple("x86_64-unknown-linux-musl");
        assert_eq!(t, Target::gnu64());

        // MinGW is a GCC toolchain even though the OS is Windows.
        let t = Target::from_triple("x86_64-pc-windows-gnu");
        assert_eq!(t.compiler, CompilerFamily::GnuCompatible);

        let t = Target::from_triple("armv7-unknown-linux-gnueabihf");
        assert_eq!(t.compiler, CompilerFamily::GnuCompatible);
        assert_eq!(t.size_t_bytes, 4);

        let t = Target::from_triple("aarch64-linux-android");
        assert_eq!(t.compiler, CompilerFamily::GnuCompatible);
    }

    #[test]
    fn test_from_triple_other() {
        let t = Target::from_triple("wasm32-unknown-unknown");
        assert_eq!(t.compiler, CompilerFamily::Other);
        assert_eq!(t.size_t_bytes, 4);

        let t = Target::from_triple("mystery-vendor-exoticos");
        assert_eq!(t.compiler, CompilerFamily::Other);
        assert_eq!(t.size_t_bytes, 8);
    }

    #[test]
    fn test_from_triple_wasi_is_clang() {
        let t = Target::from_triple("wasm32-wasip1");
        assert_eq!(t.compiler, CompilerFamily::GnuCompatible);
        assert_eq!(t.size_t_bytes, 4);
    }

    #[test]
    fn test_word_sizes() {
        assert_eq!(Target::from_triple("riscv64gc-unknown-linux-gnu").size_t_bytes, 8);
        assert_eq!(Target::from_triple("riscv32imac-unknown-none-elf").size_t_bytes, 4);
        assert_eq!(Target::from_triple("powerpc64le-unknown-linux-gnu").size_t_bytes, 8);
        assert_eq!(Target::from_triple("powerpc-unknown-linux-gnu").size_t_bytes, 4);
        assert_eq!(Target::from_triple("s390x-unknown-linux-gnu").size_t_bytes, 8);
    }
}
