pub mod actor;
pub mod obstacle;
pub mod vector;
