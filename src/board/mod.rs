//! Client-side kanban board: state mirror, drag protocol, text view.

pub mod drag;
pub mod render;
pub mod state;

pub use drag::{DragController, DragOutcome, DragState, DropTarget};
pub use render::{render_board, BoardView};
pub use state::{BoardState, Column, CommitOutcome, DEFAULT_PAGE_SIZE};
