//! Round counting and initialization helpers

pub mod rounds;
