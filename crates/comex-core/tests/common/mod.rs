pub mod export_server;
