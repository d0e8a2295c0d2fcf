//! TCP front end: accepts sockets and hands each one to a connection task.

pub mod listener;
