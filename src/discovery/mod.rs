//! Package discovery: the repository walk and source classification.

pub mod parse;
pub mod tags;
pub mod walk;

pub use parse::{is_standard_import, GoFileInfo, GoHeaderParser};
pub use tags::{preprocess_tags, PlatformConstraints};
pub use walk::{Discovery, FsDiscovery};
