//! Resources exposed alongside the tools

pub mod info;
