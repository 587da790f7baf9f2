mod attributes;
mod linked_region;
mod overlap;
mod reconcile;
mod region;

pub use attributes::{rewrite_info_id, Attributes};
pub use linked_region::{LinkedRegion, DEFAULT_PAD_LEN};
pub use overlap::{coverage, merge, overlaps, DEFAULT_MIN_OVERLAP};
pub use reconcile::reconcile_groups;
pub use region::{ContainmentError, Region, Strand, GFF_SOURCE};
