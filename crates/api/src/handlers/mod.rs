pub mod admin;
pub mod assignments;
pub mod entrepreneurs;
pub mod stands;
pub mod weeks;
