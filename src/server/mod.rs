//! Socket bootstrap: bind, accept, hand each connection to the HTTP layer.

pub mod listener;
