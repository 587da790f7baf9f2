mod family;

pub use family::{phase_family, FamilyInput, FamilyOutcome, FamilyResult, Phasing};
