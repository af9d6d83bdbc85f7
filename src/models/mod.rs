pub mod route;
pub mod waypoint;
