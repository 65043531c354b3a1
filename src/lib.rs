pub mod bracket;
pub mod classes;
pub mod dataset;
pub mod layout;
pub mod standings;
pub mod state;
