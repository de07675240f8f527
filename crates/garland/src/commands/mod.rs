pub mod build;
pub mod dev;
pub mod estimate;
pub mod init;
pub mod serve;
