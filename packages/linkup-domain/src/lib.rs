pub mod cursor;
pub mod disclosure;
pub mod keyword;
pub mod profile;
pub mod scoring;
