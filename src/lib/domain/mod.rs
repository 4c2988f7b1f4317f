pub mod circuit;
pub mod merkle;
pub mod proof;
