//! TUI widgets.

mod detail;
mod help;
mod movers;
mod news_list;
mod notifications;
mod pagination;
mod search_box;
mod status_bar;
mod stock_list;
mod tab_bar;

pub use detail::DetailView;
pub use help::HelpPanel;
pub use movers::MoversPanel;
pub use news_list::NewsList;
pub use notifications::render_notification;
pub use pagination::Pagination;
pub use search_box::SearchBox;
pub use status_bar::StatusBar;
pub use stock_list::StockList;
pub use tab_bar::TabBar;
