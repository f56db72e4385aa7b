pub mod class_table;
pub mod defect_category;
pub mod defect_classifier;
