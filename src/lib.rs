pub mod util;
pub mod world;
pub mod commands;
