// Review text handling — exact-string deduplication and key-term extraction.

pub mod normalize;
pub mod terms;
