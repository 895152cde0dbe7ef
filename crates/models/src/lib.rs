pub mod errors;
pub mod db;
pub mod validate;
pub mod orderable;
pub mod user;
pub mod category;
pub mod client;
pub mod hero_slide;
pub mod project;
pub mod service;
pub mod skill;
pub mod experience;
pub mod message;
pub mod site_setting;

#[cfg(test)]
mod tests;
