//! Completion-related modules.
//!
//! This sub-module groups all completion logic:
//! - **context**: Classifying the cursor position (member access after `.`,
//!   module path after `import`, or anything else)
//! - **builder**: Building member candidates for a component, including
//!   everything inherited through its `prototype` chain
//! - **handler**: Assembling the final candidate list for a request
pub mod builder;
pub mod context;
pub mod handler;
