pub mod fetch;
pub mod history;
pub mod spot;

pub mod util;
