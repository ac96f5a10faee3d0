//! Reusable screen components.

pub mod header;
pub mod overlay;
pub mod sidebar;
