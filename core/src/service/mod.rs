pub mod dto;
pub mod electrical_service;
pub mod production_service;
