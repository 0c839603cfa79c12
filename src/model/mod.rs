pub mod action;
pub mod order;
pub mod position;
pub mod tick;
