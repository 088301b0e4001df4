pub mod consts;
pub mod course;
pub mod loader;
pub mod logging;
pub mod storage;
