//! Port traits: the seams between the domain core and its collaborators.

pub mod config_port;
pub mod data_port;
pub mod report_port;
