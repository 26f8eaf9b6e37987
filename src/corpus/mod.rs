// Corpus state — the only state that survives across update cycles.
//
// The coordinator owns one CorpusSnapshot. Each update builds a complete new
// snapshot off to the side and swaps it in only when every step succeeded.

pub mod coordinator;
pub mod index;
pub mod snapshot;
