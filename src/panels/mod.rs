pub mod axis;
pub mod continuous;
pub mod discrete;
pub mod scrubber;
