mod write_family;
mod write_links;
mod write_tsv;

pub use write_family::FamilyWriter;
pub use write_links::LinkWriter;
pub use write_tsv::write_matrix;
