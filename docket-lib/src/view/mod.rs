//! Table view pipeline.
//!
//! Rows flow through three pure stages, `filter → sort → paginate`, driven
//! by a [`ViewState`]. [`TableView`] owns the rows, the state and the edit
//! controller of one table and recomputes the stages on demand.

mod board;
mod filter;
mod page;
mod sort;
mod state;
mod table;

pub use board::*;
pub use filter::*;
pub use page::*;
pub use sort::*;
pub use state::*;
pub use table::*;
