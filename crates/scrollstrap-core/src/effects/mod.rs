pub mod panels;
pub mod smoother;
