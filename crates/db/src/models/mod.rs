pub mod duty;
