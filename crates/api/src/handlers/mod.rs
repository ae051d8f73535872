pub mod category;
pub mod cv;
pub mod forms;
pub mod logos;
pub mod overview;
pub mod portfolio;
pub mod project;
