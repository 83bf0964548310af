pub mod states;
pub mod params;
pub mod grid;
pub mod trajectory;
pub mod field;
pub mod scenario;
