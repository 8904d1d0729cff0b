pub mod test_conn;

pub use http::*;
pub use test_conn::*;
