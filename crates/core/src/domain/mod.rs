pub mod favorites;
pub mod pantry;
pub mod recipe;
