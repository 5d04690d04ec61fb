//! Structured transition events.
//!
//! Every [`Session`](crate::Session) operation reports itself here, once
//! on entry and once on exit, as a `tracing` event under the
//! [`TARGET`] target. Nothing else in the crate logs state changes.

use std::fmt;

/// Log target for transition events.
pub const TARGET: &str = "copyforge_session::transition";

/// Which session operation a transition event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AddImages,
    AddGenericFiles,
    RemoveImage,
    RemoveGenericFile,
    ClearImages,
    ClearGenericFiles,
    BeginGeneration,
    FinishGeneration,
}

impl Operation {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AddImages => "add_images",
            Self::AddGenericFiles => "add_generic_files",
            Self::RemoveImage => "remove_image",
            Self::RemoveGenericFile => "remove_generic_file",
            Self::ClearImages => "clear_images",
            Self::ClearGenericFiles => "clear_generic_files",
            Self::BeginGeneration => "begin_generation",
            Self::FinishGeneration => "finish_generation",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Counts describing session state at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub images: usize,
    pub files: usize,
    pub processing: bool,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "images={} files={} processing={}",
            self.images, self.files, self.processing
        )
    }
}

/// An open transition. Close it with [`Span::exit`].
#[must_use = "a span must be closed with `exit`"]
#[derive(Debug)]
pub struct Span {
    op: Operation,
}

/// Record entry into `op`.
pub fn enter(op: Operation, before: Snapshot) -> Span {
    tracing::debug!(target: TARGET, op = op.name(), phase = "enter", state = %before);
    Span { op }
}

impl Span {
    /// Record exit from the operation with the resulting state and a
    /// short outcome tag (`"ok"`, `"noop"`, `"rejected"`, ...).
    pub fn exit(self, after: Snapshot, outcome: &str) {
        tracing::debug!(
            target: TARGET,
            op = self.op.name(),
            phase = "exit",
            outcome,
            state = %after
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_formats_as_key_values() {
        let s = Snapshot {
            images: 2,
            files: 0,
            processing: true,
        };
        assert_eq!(s.to_string(), "images=2 files=0 processing=true");
    }

    #[test]
    fn operation_names_are_snake_case() {
        for op in [
            Operation::AddImages,
            Operation::AddGenericFiles,
            Operation::RemoveImage,
            Operation::RemoveGenericFile,
            Operation::ClearImages,
            Operation::ClearGenericFiles,
            Operation::BeginGeneration,
            Operation::FinishGeneration,
        ] {
            let name = op.name();
            assert!(
                name.bytes().all(|b| b.is_ascii_lowercase() || b == b'_'),
                "{name:?} is not snake_case"
            );
        }
    }
}
