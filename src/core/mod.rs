pub mod breaks;
pub mod capture;
pub mod edit;
pub mod sync;
