mod auth;
mod info;
mod speed;
