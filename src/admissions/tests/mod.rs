mod common;
mod recommendation;
mod service;
