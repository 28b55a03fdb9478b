pub mod department;
pub mod electrical;
pub mod production;
pub mod section;
pub mod summary;
