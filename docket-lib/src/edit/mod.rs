//! Inline cell editing.
//!
//! [`EditController`] owns the per-cell state machine
//! (`Display → Editing → Committed | Cancelled → Display`), [`Grid`] the
//! keyboard traversal over editable cells, and [`RecordUpdater`] is the seam
//! to whatever persists committed values.

mod cell;
mod controller;
mod navigation;
mod updater;

pub use cell::*;
pub use controller::*;
pub use navigation::*;
pub use updater::*;
