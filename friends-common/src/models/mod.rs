pub mod friendship;
pub mod friendship_log;
pub mod profile;
