pub mod catalog;
pub mod charts;
pub mod rates;
