pub mod board_handlers;
pub mod board_models;
pub mod board_state;
pub mod board_view;
pub mod category_mutator;

pub use board_handlers::get_board;
pub use board_models::{ColumnLayout, Lane, MoveReport, Point, Rect};
pub use board_state::Board;
pub use board_view::{BoardView, CardView, ColumnView};
pub use category_mutator::{CategoryMutator, MoveTicket};
