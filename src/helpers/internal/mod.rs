//! Internal utilities shared by the helper modules.

pub mod fs_utils;
pub mod url_utils;
