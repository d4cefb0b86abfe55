//! Command implementations that operate outside an open board.

pub mod init;
