//! Reusable test harnesses for core traits
