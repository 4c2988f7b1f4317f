pub mod mixer;
pub mod panagram;
