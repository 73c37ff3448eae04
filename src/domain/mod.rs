// Domain layer - Core types with no I/O
pub mod analytics;
pub mod chart;
pub mod dashboard;
pub mod page;
pub mod session;
pub mod theme;
