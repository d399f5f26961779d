//! Presentation layer: egui window, view components and the request worker

mod components;
mod constants;
mod manager;
mod worker;

pub use manager::run_gui;
