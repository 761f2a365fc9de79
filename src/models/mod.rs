pub mod event;
pub mod holiday;
pub mod timer;
