//! Terminal screens for browsing the catalog, managing the cart and checking out.

pub mod actions;
pub mod events;
pub mod state;
pub mod terminal;
pub mod ui;

pub use actions::process_state;
pub use events::handle_event;
pub use state::AppState;
pub use terminal::{poll_event, restore_terminal, run_app, setup_terminal};
pub use ui::render;
