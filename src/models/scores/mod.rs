pub mod entities;
pub mod responses;
