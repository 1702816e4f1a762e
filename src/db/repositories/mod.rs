mod records;

pub use records::{insert_atom, Stored};
