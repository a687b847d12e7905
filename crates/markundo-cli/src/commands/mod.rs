pub mod labels;
pub mod replay;
