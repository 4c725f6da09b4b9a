pub mod ask;
pub mod csv;
pub mod serve;
