// Application layer: assembles adapters and core services into a runnable server.

pub mod server;
