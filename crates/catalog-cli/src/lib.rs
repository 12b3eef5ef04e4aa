//! Library side of the `catalog-import` command.
//!
//! The binary only parses arguments, opens the database and prints the
//! summary; everything it runs lives here.

pub mod logging;
pub mod pipeline;
pub mod state;
