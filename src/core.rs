pub mod advice;
pub mod cache;
pub mod optimizer;
pub mod point;
pub mod table;
pub mod verdict;
