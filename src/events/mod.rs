pub mod terminal;
pub mod worker;
