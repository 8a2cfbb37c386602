pub mod backends;
pub mod clipboard;
