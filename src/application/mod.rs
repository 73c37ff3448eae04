// Application layer - Use cases over the domain, talking to ports
pub mod chart_manager;
pub mod churn_api;
pub mod dashboard_service;
pub mod shell;
pub mod toast;
pub mod view;
