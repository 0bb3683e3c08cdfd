pub mod text_processing;
