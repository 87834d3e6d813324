//! Long-running tasks spawned by the binary alongside the HTTP server.

pub mod ledger_purge;
