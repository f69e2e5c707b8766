pub mod slots;
pub mod tree;

pub use slots::{find_section, policy_reference_lines, role_names, split_definition};
pub use tree::render_tree;
