pub mod layout;
mod renderer;
mod resources;
mod state;
pub mod theme;

pub use renderer::render;
pub use resources::TerminalResources;
pub use state::AppState;
pub use theme::Theme;
