pub mod events;
pub mod render;
pub mod views;

pub use events::handle_key;
pub use render::render;

pub const SCREEN_TITLES: [&str; 2] = ["Menu", "Inventory"];
