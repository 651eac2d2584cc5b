//! Form rendering

mod field_renderer;
mod patient_form;

pub use patient_form::draw_patient_form;
