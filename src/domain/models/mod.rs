mod action;
mod backend;
mod clipboard;
mod command;
mod event;
mod generation;
mod loading;
mod notice;
mod prompt_tab;
mod session_state;
mod textarea;

pub use action::*;
pub use backend::*;
pub use clipboard::*;
pub use command::*;
pub use event::*;
pub use generation::*;
pub use loading::*;
pub use notice::*;
pub use prompt_tab::*;
pub use session_state::*;
pub use textarea::*;
