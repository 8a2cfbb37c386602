pub mod actions;
pub mod clipboard;
pub mod events;
pub mod scroll;
mod prompt_session;
mod result_view;

pub use prompt_session::*;
pub use result_view::*;
