pub mod connection;
pub mod handler;
pub mod session;
pub mod types;

pub use connection::ConnectionManager;
pub use handler::ws_handler;
pub use session::{BoardSession, SessionAction};
pub use types::{ClientMessage, WsMessage};
