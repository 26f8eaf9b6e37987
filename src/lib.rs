// reviewmatch: similar-product recommendations from review text
//
// This is the library root. Each module corresponds to one stage of the
// recommendation pipeline, plus the collaborator boundaries around it.

pub mod catalog;
pub mod config;
pub mod corpus;
pub mod error;
pub mod output;
pub mod ranking;
pub mod reviews;
pub mod sentiment;
pub mod similarity;
