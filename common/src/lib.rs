pub mod check;
pub mod model;
pub mod session;
