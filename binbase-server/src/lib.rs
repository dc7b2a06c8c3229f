//! BIN lookup server.
//!
//! Answers "who issued this card?" for a bank identification number, serving
//! cached records from PostgreSQL and refreshing them from HandyAPI on a
//! miss or once they are a month old.

pub mod config;
pub mod domain;
pub mod handy;
pub mod lookup;
pub mod store;
pub mod web;
