pub mod board;
pub mod panels;
