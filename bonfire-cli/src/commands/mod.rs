pub(crate) mod admin;
pub(crate) mod config;
pub(crate) mod display;
pub(crate) mod games;
pub(crate) mod publishers;
pub(crate) mod recommend;
pub(crate) mod reviews;
pub(crate) mod shell;
pub(crate) mod users;
