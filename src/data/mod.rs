//! Static cutoff data: the campus/branch score table and the alias table
//! used to recognize campuses and branches in free text.

pub mod aliases;
pub mod table;

pub use aliases::{AliasTable, Entity};
pub use table::{Branch, Campus, CutoffEntry, CutoffTable, ProgramGroup};
