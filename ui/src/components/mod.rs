pub mod dynamic_form;
pub mod fields;
pub mod submitted_values;
