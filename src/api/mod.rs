pub mod dto;
pub mod event;
