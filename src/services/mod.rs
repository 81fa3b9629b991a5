pub mod chart_service;
pub mod render_service;
pub mod trend_service;
pub mod widget_service;
