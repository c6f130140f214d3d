pub mod copy;
pub mod input;
pub mod interaction_log;
pub mod logs_page;
pub mod messages;
pub mod page;
pub mod results;
pub mod styles;
pub mod terminal;
pub mod view;

pub use logs_page::LogsPage;
pub use page::{Page, ScrollTarget};
pub use terminal::TerminalView;
pub use view::ConsultationView;
