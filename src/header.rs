//! Config header generation.
//!
//! Renders a resolved [`CapabilitySet`] plus the package identity as a C
//! header the codec's native compilation units include. Every definition
//! group is wrapped in an `#ifndef` on its primary macro, so the output can
//! be included twice (directly or transitively) and composed with
//! caller-predefined macros without redefinition conflicts.
//!
//! The emitted contract for consumers: always check a presence flag
//! (`HAVE_THREAD_LOCAL`, `HAVE_BUILTIN_CTZL`, `HAVE_BITSCANFORWARD64`,
//! `HAVE_BITSCANFORWARD`) before using the capability-specific token it
//! announces. When no bit-scan flag is defined, a generic loop-based
//! count-trailing-zeros must be used instead.
//!
//! # Example
//!
//! ```rust
//! use capgen::{generate, HeaderOptions, Target};
//!
//! let options = HeaderOptions::builder("mozjpeg-sys", "2.2.3")
//!     .target(Target::msvc64())
//!     .build();
//! let header = generate(&options).unwrap();
//! assert!(header.contains("#define INLINE __forceinline"));
//! assert!(header.contains("#define HAVE_BITSCANFORWARD64"));
//! ```

use std::fs;
use std::path::Path;

use crate::caps::CapabilitySet;
use crate::error::{Error, Result};
use crate::target::Target;

/// Options controlling header generation.
///
/// Use [`HeaderOptions::builder`] to create options with a fluent API.
#[derive(Debug, Clone)]
pub struct HeaderOptions {
    /// Package name, emitted as the `PACKAGE_NAME` string.
    pub package_name: String,
    /// Package version, emitted as the `VERSION` string.
    pub version: String,
    /// Build label, emitted as the `BUILD` string. Opaque pass-through;
    /// when empty, the package name is used.
    pub build_label: String,
    /// Target the header is generated for.
    pub target: Target,
    /// Pre-decided capability slots. Populated slots override the decision
    /// table; undecided slots are resolved from `target`.
    pub overrides: CapabilitySet,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            // Identity must be set via builder; generation rejects empties.
            package_name: String::new(),
            version: String::new(),
            build_label: String::new(),
            target: Target::gnu64(),
            overrides: CapabilitySet::EMPTY,
        }
    }
}

impl HeaderOptions {
    /// Create a builder for [`HeaderOptions`].
    ///
    /// The package identity is required; the target defaults to
    /// [`Target::gnu64`].
    pub fn builder(package_name: impl Into<String>, version: impl Into<String>) -> HeaderOptionsBuilder {
        HeaderOptionsBuilder::new(package_name, version)
    }
}

/// Builder for [`HeaderOptions`].
#[derive(Debug, Clone)]
pub struct HeaderOptionsBuilder {
    options: HeaderOptions,
}

impl HeaderOptionsBuilder {
    /// Create a new builder with the package identity.
    pub fn new(package_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            options: HeaderOptions {
                package_name: package_name.into(),
                version: version.into(),
                ..Default::default()
            },
        }
    }

    /// Set the target to resolve capabilities for.
    pub fn target(mut self, target: Target) -> Self {
        self.options.target = target;
        self
    }

    /// Set the build label. Defaults to the package name.
    pub fn build_label(mut self, label: impl Into<String>) -> Self {
        self.options.build_label = label.into();
        self
    }

    /// Pre-decide capability slots; populated slots win over the decision
    /// table.
    pub fn overrides(mut self, overrides: CapabilitySet) -> Self {
        self.options.overrides = overrides;
        self
    }

    /// Build the [`HeaderOptions`].
    #[must_use]
    pub fn build(self) -> HeaderOptions {
        self.options
    }
}

/// Generate the config header.
///
/// Deterministic: the same options always produce byte-identical output.
///
/// # Errors
///
/// Returns an error if the package name or version is empty, or if any
/// identity string cannot be emitted as a C string literal.
#[must_use = "generation produces the header text that should be used"]
pub fn generate(options: &HeaderOptions) -> Result<String> {
    let mut output = String::new();
    generate_into(&mut output, options)?;
    Ok(output)
}

/// Generate the config header into a caller-provided buffer.
///
/// The `output` buffer is cleared and reused, allowing callers to avoid
/// repeated allocations across multiple targets.
pub fn generate_into(output: &mut String, options: &HeaderOptions) -> Result<()> {
    if options.package_name.is_empty() {
        return Err(Error::EmptyField {
            field: "package name",
        });
    }
    if options.version.is_empty() {
        return Err(Error::EmptyField { field: "version" });
    }
    validate_literal("package name", &options.package_name)?;
    validate_literal("version", &options.version)?;
    validate_literal("build label", &options.build_label)?;

    let mut caps = options.overrides;
    caps.fill(options.target);

    let build_label = if options.build_label.is_empty() {
        options.package_name.as_str()
    } else {
        options.build_label.as_str()
    };

    output.clear();
    output.push_str("/* Build-time capability configuration. Generated; do not edit. */\n\n");

    push_group(output, "BUILD", &[("BUILD", &quoted(build_label))]);

    if let Some(inline) = caps.inline {
        push_group(output, "INLINE", &[("INLINE", inline.token())]);
    }

    if let Some(visibility) = caps.visibility {
        push_group(output, "HIDDEN", &[("HIDDEN", visibility.token())]);
    }

    if let Some(thread_local) = caps.thread_local {
        if thread_local.is_supported() {
            push_group(
                output,
                "THREAD_LOCAL",
                &[
                    ("HAVE_THREAD_LOCAL", ""),
                    ("THREAD_LOCAL", thread_local.token()),
                ],
            );
        } else {
            push_group(output, "THREAD_LOCAL", &[("THREAD_LOCAL", "")]);
        }
    }

    push_group(
        output,
        "SIZEOF_SIZE_T",
        &[("SIZEOF_SIZE_T", &options.target.size_t_bytes.to_string())],
    );

    // Guarded on the GCC flag for all families, so a consumer that already
    // defined HAVE_BUILTIN_CTZL keeps its own selection.
    if let Some((name, value)) = caps.bit_scan.and_then(|b| b.flag()) {
        push_group(output, "HAVE_BUILTIN_CTZL", &[(name, value)]);
    }

    if let Some(fallthrough) = caps.fallthrough {
        push_group(output, "FALLTHROUGH", &[("FALLTHROUGH", fallthrough.token())]);
    }

    push_group(
        output,
        "PACKAGE_NAME",
        &[("PACKAGE_NAME", &quoted(&options.package_name))],
    );
    push_group(output, "VERSION", &[("VERSION", &quoted(&options.version))]);

    Ok(())
}

/// Generate the config header and write it to `path`.
///
/// Intended for build scripts writing under `OUT_DIR`.
pub fn write_to(path: impl AsRef<Path>, options: &HeaderOptions) -> Result<()> {
    let header = generate(options)?;
    fs::write(path, header)?;
    Ok(())
}

/// Emit one guarded definition group.
fn push_group(output: &mut String, guard: &str, defines: &[(&str, &str)]) {
    output.push_str("#ifndef ");
    output.push_str(guard);
    output.push('\n');
    for (name, value) in defines {
        output.push_str("#define ");
        output.push_str(name);
        if !value.is_empty() {
            output.push(' ');
            output.push_str(value);
        }
        output.push('\n');
    }
    output.push_str("#endif\n\n");
}

fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}

/// Reject characters that would need escaping inside a C string literal.
fn validate_literal(field: &'static str, value: &str) -> Result<()> {
    if value
        .chars()
        .any(|c| c == '"' || c == '\\' || c.is_control())
    {
        return Err(Error::InvalidStringLiteral {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
