pub mod docx;
pub mod excel;
pub mod health;
pub mod upload;
