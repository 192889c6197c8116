pub mod home_routes;
