//! Logging facilities for Trellis.
//!
//! Trellis uses the `tracing` crate for instrumentation. Hosts install a
//! subscriber themselves, typically `tracing_subscriber::fmt::init()`.
//! The constants here name the per-subsystem targets so logs can be
//! filtered with `tracing` directives, for example
//! `RUST_LOG=trellis::frame=debug`.

/// Target names for log filtering.
pub mod targets {
    /// Frame pipeline (layout, input, update, draw) target.
    pub const FRAME: &str = "trellis::frame";
    /// Widget tree and child-append target.
    pub const TREE: &str = "trellis::tree";
    /// Focus management target.
    pub const FOCUS: &str = "trellis::focus";
    /// Damage/redraw tracking target.
    pub const DAMAGE: &str = "trellis::damage";
    /// Context and configuration target.
    pub const CONTEXT: &str = "trellis::context";
}

/// Style options for widget tree debug dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

impl TreeStyle {
    /// Branch prefix for a non-final child.
    pub fn branch(&self) -> &'static str {
        match self {
            Self::Ascii => "|- ",
            Self::Unicode => "├─ ",
        }
    }

    /// Branch prefix for the last child.
    pub fn last_branch(&self) -> &'static str {
        match self {
            Self::Ascii => "`- ",
            Self::Unicode => "└─ ",
        }
    }

    /// Continuation prefix below a non-final child.
    pub fn pipe(&self) -> &'static str {
        match self {
            Self::Ascii => "|  ",
            Self::Unicode => "│  ",
        }
    }

    /// Continuation prefix below the last child.
    pub fn space(&self) -> &'static str {
        "   "
    }
}
