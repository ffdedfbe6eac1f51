//! commithub CLI library - exports modules for testing

pub mod cmd;
pub mod diff_utils;
pub mod util;
