//! # Route Modules
//!
//! | Path                                 | Module           |
//! |--------------------------------------|------------------|
//! | `/import-csv`, `/questions*`         | [`catalog`]      |
//! | `/submit`, `/report/*`, `/standards/*` | [`submissions`] |

pub mod catalog;
pub mod submissions;
