//! Turn the command line options into the values the library works on.

pub mod dadn;
pub mod grow;
