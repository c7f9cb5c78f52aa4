pub mod command;
pub mod space;
pub mod system;
pub mod window;
