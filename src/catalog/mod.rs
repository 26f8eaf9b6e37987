// Product catalog boundary — where product records come from.
//
// The core never parses markup. A ProductSource hands back a fully formed
// ProductRecord or a FetchError; everything downstream is pure computation.

pub mod file;
pub mod http;
pub mod models;
pub mod traits;
