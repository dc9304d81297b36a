//! INSTALL phase helpers - placing files
//!
//! The last step for every archive: acquire -> build -> install.
//!
//! ## Functions
//!
//! - **layout**: move_into_place, copy_tree, copy_components,
//!   relocate_expected, adopt_stray_roots

pub mod layout;

// Re-export commonly used items
pub use layout::{
    RelocationReport, adopt_stray_roots, copy_components, copy_tree, find_prefixed_dir,
    move_into_place, relocate_expected,
};
