//! Built-in migration rules

mod use_build_tools;

pub use use_build_tools::UseBuildTools;
