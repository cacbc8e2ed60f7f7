//! Generated constant-definition sources.
//!
//! Both generated files (the build id and the driver blob) are produced by
//! [`embed_constants`]: a list of named constants rendered inside one C++
//! namespace and written atomically to a fixed path.

use std::path::Path;

use crate::core::BuildResult;
use crate::util::fs::write_atomic;

/// Namespace every generated constant lives in.
pub const NAMESPACE: &str = "node";

/// Generated file holding the build identifier, relative to the project root.
pub const BUILD_ID_SOURCE: &str = "src/node_build_id.cc";

/// Generated file holding the driver blob, relative to the project root.
pub const DRIVER_SOURCE: &str = "src/node_record_replay_driver.cc";

/// Value of an embedded constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstantValue {
    /// Emitted inside a string literal, escaped by [`escape_text`].
    Text(String),
    /// Emitted as octal escapes, plus an `int` constant holding the length.
    Bytes { data: Vec<u8>, size_name: String },
}

/// A named constant in a generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedConstant {
    pub name: String,
    pub value: ConstantValue,
}

impl EmbeddedConstant {
    /// A `char[]` constant holding `value` as-is.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        EmbeddedConstant {
            name: name.into(),
            value: ConstantValue::Text(value.into()),
        }
    }

    /// A `char[]` constant holding `data`, with its byte count in `size_name`.
    pub fn bytes(
        name: impl Into<String>,
        size_name: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        EmbeddedConstant {
            name: name.into(),
            value: ConstantValue::Bytes {
                data: data.into(),
                size_name: size_name.into(),
            },
        }
    }
}

/// Escape every byte as `\ooo` (unpadded octal).
///
/// Every byte is escaped, so an escape is always followed by another
/// backslash or the closing quote and can never absorb a following digit.
pub fn octal_escape(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 4);
    for byte in data {
        out.push_str(&format!("\\{:o}", byte));
    }
    out
}

/// Escape text for a C string literal.
///
/// Quotes, backslashes, and control characters are escaped so the literal
/// always compiles to exactly `text`. Control characters use three-digit
/// octal so a following digit is never absorbed. Plain text passes through
/// unchanged.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Render the constants as a compilable source unit.
pub fn render_constants(namespace: &str, constants: &[EmbeddedConstant]) -> String {
    // A lone text constant stays on one line.
    if let [EmbeddedConstant {
        name,
        value: ConstantValue::Text(text),
    }] = constants
    {
        return format!(
            "namespace {} {{ char {}[] = \"{}\"; }}",
            namespace,
            name,
            escape_text(text)
        );
    }

    let mut out = format!("\nnamespace {} {{\n", namespace);
    for constant in constants {
        match &constant.value {
            ConstantValue::Text(text) => {
                out.push_str(&format!(
                    "  char {}[] = \"{}\";\n",
                    constant.name,
                    escape_text(text)
                ));
            }
            ConstantValue::Bytes { data, size_name } => {
                out.push_str(&format!(
                    "  char {}[] = \"{}\";\n",
                    constant.name,
                    octal_escape(data)
                ));
                out.push_str(&format!("  int {} = {};\n", size_name, data.len()));
            }
        }
    }
    out.push_str("}\n");
    out
}

/// Write `constants` to `path`, replacing any previous contents atomically.
pub fn embed_constants(
    path: &Path,
    namespace: &str,
    constants: &[EmbeddedConstant],
) -> BuildResult<()> {
    let source = render_constants(namespace, constants);
    write_atomic(path, source.as_bytes())?;
    tracing::debug!(
        "wrote {} ({} constants, {} bytes)",
        path.display(),
        constants.len(),
        source.len()
    );
    Ok(())
}

/// Write the build identifier source.
pub fn embed_build_id(project_root: &Path, build_id: &str) -> BuildResult<()> {
    embed_constants(
        &project_root.join(BUILD_ID_SOURCE),
        NAMESPACE,
        &[EmbeddedConstant::text("gBuildId", build_id)],
    )
}

/// Write the record/replay driver source.
pub fn embed_driver(project_root: &Path, driver: Vec<u8>) -> BuildResult<()> {
    embed_constants(
        &project_root.join(DRIVER_SOURCE),
        NAMESPACE,
        &[EmbeddedConstant::bytes(
            "gRecordReplayDriver",
            "gRecordReplayDriverSize",
            driver,
        )],
    )
}
