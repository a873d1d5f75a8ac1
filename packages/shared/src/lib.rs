//! Utilities shared by the Tebak relay server and terminal client.

pub mod logger;
pub mod time;
