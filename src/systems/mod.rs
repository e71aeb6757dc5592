pub mod interaction;
pub mod town;
pub mod ui;
