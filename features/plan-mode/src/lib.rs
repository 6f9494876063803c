//! Plan mode: a read-only exploration mode that confines writes to a single
//! plan file while the agent drafts an approach before acting on it.

mod error;
mod plan_file;
mod plan_slug;
mod state;

pub use error::PlanModeError;
pub use error::Result;
pub use plan_file::PlanFileManager;
pub use plan_file::ensure_plan_dir;
pub use plan_file::get_plan_dir;
pub use plan_file::get_plan_file_path;
pub use plan_file::is_plan_file;
pub use plan_file::read_plan_file;
pub use plan_slug::generate_slug;
pub use state::PlanModeState;
pub use state::is_safe_file;
