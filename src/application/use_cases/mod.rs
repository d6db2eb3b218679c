mod generate_methodology;

pub use generate_methodology::*;
