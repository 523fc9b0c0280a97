//! UI Components
//!
//! Reusable Leptos components for the portal.

pub mod nav;
pub mod sidebar;
pub mod chart;
pub mod metric_card;
pub mod loading;
pub mod toast;

pub use nav::Nav;
pub use sidebar::Sidebar;
pub use chart::{BarChart, PieChart};
pub use metric_card::MetricCard;
pub use loading::{Loading, ListSkeleton};
pub use toast::Toast;
