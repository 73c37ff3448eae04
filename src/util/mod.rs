// Generic helpers shared by every layer
pub mod collections;
pub mod csv;
pub mod format;
pub mod storage;
pub mod timing;
pub mod web;
