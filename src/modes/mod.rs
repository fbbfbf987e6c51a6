pub mod gesture;
pub mod human;

pub use gesture::GestureMode;
pub use human::HumanMode;
