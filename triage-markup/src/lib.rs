pub mod escape;
pub mod html;
pub mod prelude;
pub mod styling;
pub mod theme;

pub use escape::*;
pub use html::*;
pub use theme::Theme;
