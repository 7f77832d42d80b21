//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the layout state and turns it into cells on the
//! terminal.  Placement is computed in [`geometry`], drawing happens in
//! [`shell`].

pub mod content;
pub mod controls;
pub mod geometry;
pub mod shell;
pub mod slide;
pub mod tabs;
pub mod theme;
