pub mod mortgage;
pub mod programs;
